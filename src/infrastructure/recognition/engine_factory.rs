use std::sync::Arc;

use crate::application::ports::{RecognitionError, SpeechRecognizer};
use crate::presentation::config::{RecognitionProviderSetting, RecognitionSettings};

use super::remote_whisper_engine::RemoteWhisperEngine;

pub struct RecognitionEngineFactory;

impl RecognitionEngineFactory {
    pub fn create(
        settings: &RecognitionSettings,
    ) -> Result<Arc<dyn SpeechRecognizer>, RecognitionError> {
        match settings.provider {
            RecognitionProviderSetting::Remote => {
                let key = settings.api_key.clone().ok_or_else(|| {
                    RecognitionError::ModelLoadFailed(
                        "RECOGNITION_API_KEY required for the remote engine".to_string(),
                    )
                })?;
                Ok(Arc::new(RemoteWhisperEngine::new(
                    key,
                    settings.base_url.clone(),
                    Some(settings.model.clone()),
                )))
            }
            RecognitionProviderSetting::Local => Self::create_local(settings),
        }
    }

    #[cfg(feature = "local-whisper")]
    fn create_local(
        settings: &RecognitionSettings,
    ) -> Result<Arc<dyn SpeechRecognizer>, RecognitionError> {
        use super::local_whisper_engine::LocalWhisperEngine;

        let engine = LocalWhisperEngine::new(&settings.model_dir, &settings.model)?;
        Ok(Arc::new(engine))
    }

    #[cfg(not(feature = "local-whisper"))]
    fn create_local(
        _settings: &RecognitionSettings,
    ) -> Result<Arc<dyn SpeechRecognizer>, RecognitionError> {
        Err(RecognitionError::ModelLoadFailed(
            "built without the local-whisper feature".to_string(),
        ))
    }
}
