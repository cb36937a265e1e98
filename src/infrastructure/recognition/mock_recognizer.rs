use std::path::Path;

use async_trait::async_trait;

use crate::application::ports::{RecognitionError, SpeechRecognizer};
use crate::domain::{Transcript, TranscriptSegment};

/// Recognizer for tests: returns a fixed transcript, or fails when
/// constructed as failing.
pub struct MockRecognizer {
    transcript: Option<Transcript>,
}

impl MockRecognizer {
    pub fn returning(transcript: Transcript) -> Self {
        Self {
            transcript: Some(transcript),
        }
    }

    pub fn failing() -> Self {
        Self { transcript: None }
    }

    /// Two-segment English transcript used across tests.
    pub fn sample_transcript() -> Transcript {
        Transcript {
            duration: 12.5,
            language: Some("en".to_string()),
            segments: vec![
                TranscriptSegment {
                    index: 0,
                    start: 0.0,
                    end: 2.0,
                    text: " Hi ".to_string(),
                    words: None,
                },
                TranscriptSegment {
                    index: 1,
                    start: 2.0,
                    end: 4.0,
                    text: "there".to_string(),
                    words: None,
                },
            ],
        }
    }
}

#[async_trait]
impl SpeechRecognizer for MockRecognizer {
    async fn transcribe(&self, _audio: &Path) -> Result<Transcript, RecognitionError> {
        self.transcript.clone().ok_or_else(|| {
            RecognitionError::RecognitionFailed("injected recognition failure".to_string())
        })
    }
}
