use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use crate::application::ports::{RecognitionError, SpeechRecognizer};
use crate::domain::{Transcript, TranscriptSegment, WordSpan};

/// Upstream error bodies are truncated to this many characters before they
/// are folded into recognition errors.
const BODY_EXCERPT_LEN: usize = 512;

/// Recognizer backed by an OpenAI-compatible `/audio/transcriptions`
/// endpoint, requested as `verbose_json` with segment and word timestamps.
/// Stateless; safe to call from concurrent requests.
pub struct RemoteWhisperEngine {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl RemoteWhisperEngine {
    pub fn new(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            model: model.unwrap_or_else(|| "whisper-1".to_string()),
        }
    }
}

#[async_trait]
impl SpeechRecognizer for RemoteWhisperEngine {
    async fn transcribe(&self, audio: &Path) -> Result<Transcript, RecognitionError> {
        let url = format!("{}/audio/transcriptions", self.base_url);

        let audio_data = tokio::fs::read(audio)
            .await
            .map_err(|e| RecognitionError::AudioReadFailed(e.to_string()))?;

        let file_part = multipart::Part::bytes(audio_data)
            .file_name("audio.wav")
            .mime_str("audio/wav")
            .map_err(|e| RecognitionError::ApiRequestFailed(format!("mime: {}", e)))?;

        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "verbose_json")
            .text("timestamp_granularities[]", "segment")
            .text("timestamp_granularities[]", "word")
            .part("file", file_part);

        tracing::debug!(model = %self.model, "Sending audio to remote Whisper API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| RecognitionError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(RecognitionError::ApiRequestFailed(format!(
                "status {}: {}",
                status,
                body_excerpt(&body)
            )));
        }

        let verbose: VerboseTranscription = response
            .json()
            .await
            .map_err(|e| RecognitionError::ApiRequestFailed(format!("body: {}", e)))?;

        let transcript = verbose.into_transcript();

        tracing::info!(
            segments = transcript.segments.len(),
            duration = transcript.duration,
            "Remote Whisper transcription completed"
        );

        Ok(transcript)
    }
}

fn body_excerpt(body: &str) -> String {
    let mut excerpt: String = body.chars().take(BODY_EXCERPT_LEN).collect();
    if excerpt.len() < body.len() {
        excerpt.push_str("...");
    }
    excerpt
}

#[derive(Debug, Deserialize)]
struct VerboseTranscription {
    duration: f64,
    language: Option<String>,
    #[serde(default)]
    segments: Vec<VerboseSegment>,
    #[serde(default)]
    words: Vec<VerboseWord>,
}

#[derive(Debug, Deserialize)]
struct VerboseSegment {
    id: u32,
    start: f64,
    end: f64,
    text: String,
}

#[derive(Debug, Deserialize)]
struct VerboseWord {
    word: String,
    start: f64,
    end: f64,
}

impl VerboseTranscription {
    /// The API reports words as one flat list; fold each word into the
    /// segment whose time range contains its start. Segments keep API
    /// order; a segment with no words keeps `words: None`.
    fn into_transcript(self) -> Transcript {
        let mut segments: Vec<TranscriptSegment> = self
            .segments
            .into_iter()
            .map(|s| TranscriptSegment {
                index: s.id,
                start: s.start,
                end: s.end,
                text: s.text,
                words: None,
            })
            .collect();

        for word in self.words {
            let span = WordSpan {
                word: word.word,
                start: word.start,
                end: word.end,
            };
            if let Some(segment) = segments
                .iter_mut()
                .find(|s| span.start >= s.start && span.start < s.end)
            {
                segment.words.get_or_insert_with(Vec::new).push(span);
            }
        }

        Transcript {
            duration: self.duration,
            language: self.language,
            segments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_flat_word_list_when_converting_then_words_fold_into_segments() {
        let verbose = VerboseTranscription {
            duration: 4.0,
            language: Some("en".to_string()),
            segments: vec![
                VerboseSegment {
                    id: 0,
                    start: 0.0,
                    end: 2.0,
                    text: " Hi".to_string(),
                },
                VerboseSegment {
                    id: 1,
                    start: 2.0,
                    end: 4.0,
                    text: " there".to_string(),
                },
            ],
            words: vec![
                VerboseWord {
                    word: "Hi".to_string(),
                    start: 0.1,
                    end: 0.4,
                },
                VerboseWord {
                    word: "there".to_string(),
                    start: 2.1,
                    end: 2.5,
                },
            ],
        };

        let transcript = verbose.into_transcript();
        assert_eq!(transcript.segments[0].words.as_ref().unwrap().len(), 1);
        assert_eq!(transcript.segments[1].words.as_ref().unwrap()[0].word, "there");
    }

    #[test]
    fn given_no_words_when_converting_then_segments_keep_none() {
        let verbose = VerboseTranscription {
            duration: 1.0,
            language: None,
            segments: vec![VerboseSegment {
                id: 0,
                start: 0.0,
                end: 1.0,
                text: "hello".to_string(),
            }],
            words: vec![],
        };

        let transcript = verbose.into_transcript();
        assert!(transcript.segments[0].words.is_none());
    }

    #[test]
    fn given_long_upstream_error_body_when_excerpting_then_truncated_with_marker() {
        let body = "x".repeat(BODY_EXCERPT_LEN * 8);
        let excerpt = body_excerpt(&body);
        assert!(excerpt.ends_with("..."));
        assert!(excerpt.len() <= BODY_EXCERPT_LEN + 3);
    }

    #[test]
    fn given_short_upstream_error_body_when_excerpting_then_unchanged() {
        assert_eq!(body_excerpt("model not found"), "model not found");
    }
}
