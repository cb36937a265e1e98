use std::path::Path;

use async_trait::async_trait;

use crate::domain::Transcript;

/// Speech recognition capability. Implementations materialize the full
/// segment sequence, in engine order, before returning — both persisted
/// transcript forms need the complete ordered set.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    async fn transcribe(&self, audio: &Path) -> Result<Transcript, RecognitionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RecognitionError {
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("recognition failed: {0}")]
    RecognitionFailed(String),
    #[error("audio read failed: {0}")]
    AudioReadFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
}
