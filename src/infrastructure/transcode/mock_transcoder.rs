use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::application::ports::{MediaTranscoder, TranscodeError};
use crate::domain::{StreamingBundle, PLAYLIST_FILE_NAME};

/// Transcoder for tests: writes placeholder outputs into the workspace, or
/// fails both operations when constructed as failing.
pub struct MockTranscoder {
    segment_count: usize,
    fail: bool,
}

impl MockTranscoder {
    pub fn new(segment_count: usize) -> Self {
        Self {
            segment_count,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            segment_count: 0,
            fail: true,
        }
    }
}

#[async_trait]
impl MediaTranscoder for MockTranscoder {
    async fn to_recognition_audio(
        &self,
        _input: &Path,
        workspace: &Path,
    ) -> Result<PathBuf, TranscodeError> {
        if self.fail {
            return Err(TranscodeError::ToolFailed {
                exit_code: 1,
                stderr_excerpt: "injected transcode failure".to_string(),
            });
        }
        let audio = workspace.join("audio.wav");
        tokio::fs::write(&audio, b"fake pcm")
            .await
            .map_err(|e| TranscodeError::MissingOutput(e.to_string()))?;
        Ok(audio)
    }

    async fn to_streaming_bundle(
        &self,
        _input: &Path,
        workspace: &Path,
    ) -> Result<StreamingBundle, TranscodeError> {
        if self.fail {
            return Err(TranscodeError::ToolFailed {
                exit_code: 1,
                stderr_excerpt: "injected transcode failure".to_string(),
            });
        }
        let dir = workspace.join("hls");
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| TranscodeError::MissingOutput(e.to_string()))?;

        let playlist = dir.join(PLAYLIST_FILE_NAME);
        tokio::fs::write(&playlist, b"#EXTM3U\n")
            .await
            .map_err(|e| TranscodeError::MissingOutput(e.to_string()))?;

        let mut segments = Vec::new();
        for i in 0..self.segment_count {
            let segment = dir.join(format!("master{}.ts", i));
            tokio::fs::write(&segment, b"fake segment")
                .await
                .map_err(|e| TranscodeError::MissingOutput(e.to_string()))?;
            segments.push(segment);
        }

        Ok(StreamingBundle {
            dir,
            playlist,
            segments,
        })
    }
}
