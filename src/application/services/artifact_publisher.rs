use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;

use crate::application::ports::{StorageGateway, StorageGatewayError};
use crate::domain::Transcript;

const PLAYLIST_CONTENT_TYPE: &str = "application/vnd.apple.mpegurl";
const SEGMENT_CONTENT_TYPE: &str = "video/mp2t";
const JSON_CONTENT_TYPE: &str = "application/json";
const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Uploads pipeline outputs to deterministic destination paths with upsert
/// semantics.
pub struct ArtifactPublisher {
    gateway: Arc<dyn StorageGateway>,
}

impl ArtifactPublisher {
    pub fn new(gateway: Arc<dyn StorageGateway>) -> Self {
        Self { gateway }
    }

    /// Publish every file present in the local bundle directory under
    /// `{prefix}/<filename>`. The transcoder decides how many segment
    /// files exist; nothing here assumes a count. Files are uploaded in
    /// filename order so logs stay deterministic.
    pub async fn publish_bundle(
        &self,
        bucket: &str,
        prefix: &str,
        bundle_dir: &Path,
    ) -> Result<(), PublishError> {
        let mut entries = tokio::fs::read_dir(bundle_dir)
            .await
            .map_err(|e| PublishError::LocalRead(e.to_string()))?;

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| PublishError::LocalRead(e.to_string()))?
        {
            if entry
                .file_type()
                .await
                .map_err(|e| PublishError::LocalRead(e.to_string()))?
                .is_file()
            {
                files.push(entry.path());
            }
        }
        files.sort();

        for file in files {
            let name = file
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| PublishError::LocalRead(format!("unreadable filename: {:?}", file)))?
                .to_string();

            let content = tokio::fs::read(&file)
                .await
                .map_err(|e| PublishError::LocalRead(e.to_string()))?;

            let destination = format!("{}/{}", prefix, name);
            tracing::debug!(bucket, path = %destination, bytes = content.len(), "Publishing bundle file");

            self.gateway
                .put(
                    bucket,
                    &destination,
                    Bytes::from(content),
                    content_type_for(&name),
                )
                .await?;
        }

        Ok(())
    }

    /// Publish both transcript forms at `{prefix}.json` and `{prefix}.txt`.
    /// Returns the two destination paths.
    pub async fn publish_transcripts(
        &self,
        bucket: &str,
        prefix: &str,
        transcript: &Transcript,
    ) -> Result<(String, String), PublishError> {
        let json_path = format!("{}.json", prefix);
        let txt_path = format!("{}.txt", prefix);

        let json = serde_json::to_vec(transcript)
            .map_err(|e| PublishError::Serialization(e.to_string()))?;

        self.gateway
            .put(bucket, &json_path, Bytes::from(json), JSON_CONTENT_TYPE)
            .await?;

        self.gateway
            .put(
                bucket,
                &txt_path,
                Bytes::from(transcript.plain_text().into_bytes()),
                TEXT_CONTENT_TYPE,
            )
            .await?;

        Ok((json_path, txt_path))
    }
}

fn content_type_for(filename: &str) -> &'static str {
    if filename.ends_with(".m3u8") {
        PLAYLIST_CONTENT_TYPE
    } else {
        SEGMENT_CONTENT_TYPE
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("upload: {0}")]
    Upload(#[from] StorageGatewayError),
    #[error("reading local artifact: {0}")]
    LocalRead(String),
    #[error("serializing transcript: {0}")]
    Serialization(String),
}
