use std::path::{Path, PathBuf};
use std::process::Output;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{MediaTranscoder, TranscodeError};
use crate::domain::{StreamingBundle, PLAYLIST_FILE_NAME};

/// ffmpeg diagnostics are truncated to this many bytes before being carried
/// in errors.
const STDERR_EXCERPT_LEN: usize = 1024;

const RECOGNITION_SAMPLE_RATE: &str = "16000";
const HLS_SEGMENT_SECONDS: &str = "4";

/// MediaTranscoder backed by the ffmpeg binary. Each operation is a single
/// awaited child process invocation.
pub struct FfmpegTranscoder {
    binary: String,
}

impl FfmpegTranscoder {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    async fn run(&self, args: &[&str]) -> Result<(), TranscodeError> {
        tracing::debug!(binary = %self.binary, args = ?args, "Running transcoder");

        let output: Output = Command::new(&self.binary)
            .args(args)
            .output()
            .await
            .map_err(|e| TranscodeError::SpawnFailed(format!("{}: {}", self.binary, e)))?;

        if !output.status.success() {
            return Err(TranscodeError::ToolFailed {
                exit_code: output.status.code().unwrap_or(-1),
                stderr_excerpt: stderr_excerpt(&output.stderr),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl MediaTranscoder for FfmpegTranscoder {
    async fn to_recognition_audio(
        &self,
        input: &Path,
        workspace: &Path,
    ) -> Result<PathBuf, TranscodeError> {
        let output_path = workspace.join("audio.wav");
        let input_str = path_str(input)?;
        let output_str = path_str(&output_path)?;

        // Mono 16 kHz PCM, the layout the recognition engine expects.
        self.run(&[
            "-i", input_str, "-ar", RECOGNITION_SAMPLE_RATE, "-ac", "1", "-f", "wav", output_str,
            "-y",
        ])
        .await?;

        if !output_path.exists() {
            return Err(TranscodeError::MissingOutput(
                "recognition audio not written".to_string(),
            ));
        }

        Ok(output_path)
    }

    async fn to_streaming_bundle(
        &self,
        input: &Path,
        workspace: &Path,
    ) -> Result<StreamingBundle, TranscodeError> {
        let bundle_dir = workspace.join("hls");
        tokio::fs::create_dir_all(&bundle_dir)
            .await
            .map_err(|e| TranscodeError::SpawnFailed(format!("creating hls dir: {}", e)))?;

        let playlist = bundle_dir.join(PLAYLIST_FILE_NAME);
        let input_str = path_str(input)?;
        let playlist_str = path_str(&playlist)?;

        // Single rendition VOD bundle; the playlist enumerates every
        // segment produced in the same directory.
        self.run(&[
            "-i",
            input_str,
            "-c:v",
            "libx264",
            "-c:a",
            "aac",
            "-f",
            "hls",
            "-hls_time",
            HLS_SEGMENT_SECONDS,
            "-hls_list_size",
            "0",
            "-hls_playlist_type",
            "vod",
            playlist_str,
            "-y",
        ])
        .await?;

        if !playlist.exists() {
            return Err(TranscodeError::MissingOutput(
                "hls playlist not written".to_string(),
            ));
        }

        let mut segments = Vec::new();
        let mut entries = tokio::fs::read_dir(&bundle_dir)
            .await
            .map_err(|e| TranscodeError::MissingOutput(format!("reading hls dir: {}", e)))?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| TranscodeError::MissingOutput(format!("reading hls dir: {}", e)))?
        {
            if entry.path() != playlist {
                segments.push(entry.path());
            }
        }
        segments.sort();

        Ok(StreamingBundle {
            dir: bundle_dir,
            playlist,
            segments,
        })
    }
}

fn path_str(path: &Path) -> Result<&str, TranscodeError> {
    path.to_str()
        .ok_or_else(|| TranscodeError::SpawnFailed(format!("non-utf8 path: {:?}", path)))
}

fn stderr_excerpt(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let mut excerpt: String = text.chars().take(STDERR_EXCERPT_LEN).collect();
    if excerpt.len() < text.len() {
        excerpt.push_str("...");
    }
    excerpt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_long_stderr_when_excerpting_then_truncated_with_marker() {
        let stderr = vec![b'x'; STDERR_EXCERPT_LEN * 2];
        let excerpt = stderr_excerpt(&stderr);
        assert!(excerpt.ends_with("..."));
        assert!(excerpt.len() <= STDERR_EXCERPT_LEN + 3);
    }

    #[test]
    fn given_short_stderr_when_excerpting_then_unchanged() {
        assert_eq!(stderr_excerpt(b"boom"), "boom");
    }
}
