use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::StreamingBundle;

/// External transcoding capability, both operations driven from the same
/// downloaded source file. Invoked once per request, no retries.
#[async_trait]
pub trait MediaTranscoder: Send + Sync {
    /// Produce a single-channel 16 kHz PCM audio file suitable for the
    /// recognition engine, written inside `workspace`.
    async fn to_recognition_audio(
        &self,
        input: &Path,
        workspace: &Path,
    ) -> Result<PathBuf, TranscodeError>;

    /// Produce a VOD HLS bundle (4 second target segment duration, single
    /// rendition) under a directory inside `workspace`.
    async fn to_streaming_bundle(
        &self,
        input: &Path,
        workspace: &Path,
    ) -> Result<StreamingBundle, TranscodeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscodeError {
    /// Non-zero exit from the transcoding tool. `stderr_excerpt` is
    /// truncated to a fixed length, never the full output.
    #[error("transcoder exited with code {exit_code}: {stderr_excerpt}")]
    ToolFailed {
        exit_code: i32,
        stderr_excerpt: String,
    },
    #[error("transcoder produced no output: {0}")]
    MissingOutput(String),
    #[error("failed to invoke transcoder: {0}")]
    SpawnFailed(String),
}
