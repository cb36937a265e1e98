use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::application::ports::{RecognitionError, SpeechRecognizer};
use crate::domain::{Transcript, TranscriptSegment};

const SAMPLE_RATE: usize = 16_000;

/// Recognizer backed by whisper.cpp via whisper-rs.
///
/// The model is loaded once at startup and reused by every request. The
/// binding is not proven safe for concurrent inference, so the context sits
/// behind a `Mutex` and requests serialize on it; inference itself runs on
/// the blocking pool. Word-level timestamps are not produced by this
/// engine, so segments carry `words: None`.
pub struct LocalWhisperEngine {
    context: Arc<Mutex<WhisperContext>>,
}

impl LocalWhisperEngine {
    /// Load a ggml model selected by size name (`tiny`, `base`, `small`,
    /// `medium`, `large`) from `model_dir`.
    pub fn new(model_dir: &Path, model_size: &str) -> Result<Self, RecognitionError> {
        let model_path = model_dir.join(format!("ggml-{}.bin", model_size));
        if !model_path.exists() {
            return Err(RecognitionError::ModelLoadFailed(format!(
                "model file not found: {}",
                model_path.display()
            )));
        }

        tracing::info!(model = %model_path.display(), "Loading Whisper model");

        let context = WhisperContext::new_with_params(
            model_path.to_str().ok_or_else(|| {
                RecognitionError::ModelLoadFailed("non-utf8 model path".to_string())
            })?,
            WhisperContextParameters::default(),
        )
        .map_err(|e| RecognitionError::ModelLoadFailed(e.to_string()))?;

        Ok(Self {
            context: Arc::new(Mutex::new(context)),
        })
    }
}

#[async_trait]
impl SpeechRecognizer for LocalWhisperEngine {
    async fn transcribe(&self, audio: &Path) -> Result<Transcript, RecognitionError> {
        let samples = read_wav_samples(audio)?;
        let duration = samples.len() as f64 / SAMPLE_RATE as f64;

        let context = Arc::clone(&self.context);
        let segments = tokio::task::spawn_blocking(move || run_inference(&context, &samples))
            .await
            .map_err(|e| RecognitionError::RecognitionFailed(format!("join: {}", e)))??;

        let (segments, language) = segments;

        Ok(Transcript {
            duration,
            language,
            segments,
        })
    }
}

fn run_inference(
    context: &Mutex<WhisperContext>,
    samples: &[f32],
) -> Result<(Vec<TranscriptSegment>, Option<String>), RecognitionError> {
    let context = context
        .lock()
        .map_err(|e| RecognitionError::RecognitionFailed(format!("context lock: {}", e)))?;

    let mut state = context
        .create_state()
        .map_err(|e| RecognitionError::RecognitionFailed(format!("state: {}", e)))?;

    let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
    params.set_language(None);
    params.set_print_special(false);
    params.set_print_progress(false);
    params.set_print_realtime(false);
    params.set_print_timestamps(false);

    state
        .full(params, samples)
        .map_err(|e| RecognitionError::RecognitionFailed(e.to_string()))?;

    let lang_id = state.full_lang_id_from_state();
    let language = whisper_rs::get_lang_str(lang_id).map(|s| s.to_string());

    let mut segments = Vec::new();
    for (index, segment) in state.as_iter().enumerate() {
        segments.push(TranscriptSegment {
            index: index as u32,
            // timestamps are reported in centiseconds
            start: segment.start_timestamp() as f64 / 100.0,
            end: segment.end_timestamp() as f64 / 100.0,
            text: segment.to_string(),
            words: None,
        });
    }

    Ok((segments, language))
}

/// Read a mono 16 kHz PCM wav file (the transcoder's recognition output)
/// and normalize samples to `[-1.0, 1.0]`.
fn read_wav_samples(path: &Path) -> Result<Vec<f32>, RecognitionError> {
    let reader =
        hound::WavReader::open(path).map_err(|e| RecognitionError::AudioReadFailed(e.to_string()))?;

    let samples: Result<Vec<i16>, _> = reader.into_samples::<i16>().collect();
    let samples = samples.map_err(|e| RecognitionError::AudioReadFailed(e.to_string()))?;

    Ok(samples
        .iter()
        .map(|&sample| sample as f32 / 32768.0)
        .collect())
}
