use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::ports::{
    MediaTranscoder, RecognitionError, SpeechRecognizer, StorageGateway, TranscodeError,
};
use crate::domain::{ResolvedSource, SourceLocator, StreamingBundle};

use super::artifact_publisher::{ArtifactPublisher, PublishError};

/// Immutable, validated input to one pipeline run.
#[derive(Debug, Clone)]
pub struct ProcessRequest {
    pub raw_locator: String,
    pub processed_prefix: String,
    pub transcript_prefix: Option<String>,
}

/// Result of a completed pipeline run.
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    pub processed_path: String,
    pub transcript_json: String,
    pub transcript_txt: String,
    pub duration: f64,
    pub language: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub api_key: String,
    pub raw_bucket: String,
    pub processed_bucket: String,
    pub transcripts_bucket: String,
    /// Root under which per-request workspaces are created.
    pub work_dir: PathBuf,
}

/// Orchestrates one synchronous pipeline run: resolve, download, transcode,
/// transcribe, publish. Owns the per-request workspace lifecycle.
pub struct PipelineService {
    gateway: Arc<dyn StorageGateway>,
    transcoder: Arc<dyn MediaTranscoder>,
    recognizer: Arc<dyn SpeechRecognizer>,
    publisher: ArtifactPublisher,
    locator: SourceLocator,
    config: PipelineConfig,
}

impl PipelineService {
    pub fn new(
        gateway: Arc<dyn StorageGateway>,
        transcoder: Arc<dyn MediaTranscoder>,
        recognizer: Arc<dyn SpeechRecognizer>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            publisher: ArtifactPublisher::new(Arc::clone(&gateway)),
            locator: SourceLocator::new(config.raw_bucket.clone()),
            gateway,
            transcoder,
            recognizer,
            config,
        }
    }

    /// Run the full pipeline for one request.
    ///
    /// Authentication and field validation happen before the workspace is
    /// created or any collaborator is called, so a rejected request costs
    /// no downstream work. The workspace is deleted on every exit path.
    pub async fn process(
        &self,
        request: ProcessRequest,
        api_key: Option<&str>,
    ) -> Result<ProcessOutcome, PipelineError> {
        if api_key != Some(self.config.api_key.as_str()) {
            return Err(PipelineError::Unauthorized);
        }
        if request.raw_locator.is_empty() {
            return Err(PipelineError::BadRequest("rawPath is required".to_string()));
        }
        if request.processed_prefix.is_empty() {
            return Err(PipelineError::BadRequest(
                "processedPrefix is required".to_string(),
            ));
        }

        let workspace = tempfile::Builder::new()
            .prefix("pipeline-")
            .tempdir_in(&self.config.work_dir)
            .map_err(|e| PipelineError::Internal(format!("workspace creation: {}", e)))?;

        // TempDir drop removes the workspace unconditionally, including on
        // faults raised by any stage below.
        let result = self.run_stages(&request, workspace.path()).await;

        if let Err(e) = &result {
            tracing::error!(error = %e, "Pipeline failed");
        }

        result
    }

    async fn run_stages(
        &self,
        request: &ProcessRequest,
        workspace: &Path,
    ) -> Result<ProcessOutcome, PipelineError> {
        let source = self.locator.resolve(&request.raw_locator);
        tracing::debug!(source = %source, "Resolved raw locator");

        let local_raw = self.download(&source, workspace).await?;

        let audio = self
            .transcoder
            .to_recognition_audio(&local_raw, workspace)
            .await?;

        let bundle = self
            .transcoder
            .to_streaming_bundle(&local_raw, workspace)
            .await?;
        tracing::info!(segments = bundle.segments.len(), "Streaming bundle ready");

        let transcript = self.recognizer.transcribe(&audio).await?;
        tracing::info!(
            duration = transcript.duration,
            language = transcript.language.as_deref().unwrap_or("unknown"),
            segments = transcript.segments.len(),
            "Transcription completed"
        );

        self.publisher
            .publish_bundle(
                &self.config.processed_bucket,
                &request.processed_prefix,
                &bundle.dir,
            )
            .await
            .map_err(map_publish_error)?;

        let transcript_prefix = request
            .transcript_prefix
            .as_deref()
            .unwrap_or(&request.processed_prefix);

        let (transcript_json, transcript_txt) = self
            .publisher
            .publish_transcripts(
                &self.config.transcripts_bucket,
                transcript_prefix,
                &transcript,
            )
            .await
            .map_err(map_publish_error)?;

        Ok(ProcessOutcome {
            processed_path: StreamingBundle::published_playlist_path(&request.processed_prefix),
            transcript_json,
            transcript_txt,
            duration: transcript.duration,
            language: transcript.language,
        })
    }

    async fn download(
        &self,
        source: &ResolvedSource,
        workspace: &Path,
    ) -> Result<PathBuf, PipelineError> {
        let (content, name) = match source {
            ResolvedSource::Object { bucket, path } => {
                let content = self
                    .gateway
                    .get(bucket, path)
                    .await
                    .map_err(|e| PipelineError::DownloadFailed(e.to_string()))?;
                (content, file_name_of(path))
            }
            ResolvedSource::Url(url) => {
                let content = self
                    .gateway
                    .get_url(url)
                    .await
                    .map_err(|e| PipelineError::DownloadFailed(e.to_string()))?;
                let without_query = url.split('?').next().unwrap_or(url);
                (content, file_name_of(without_query))
            }
        };

        let local_raw = workspace.join(name);
        tokio::fs::write(&local_raw, &content)
            .await
            .map_err(|e| PipelineError::Internal(format!("writing source file: {}", e)))?;

        tracing::debug!(bytes = content.len(), path = %local_raw.display(), "Raw file downloaded");
        Ok(local_raw)
    }
}

fn file_name_of(path: &str) -> String {
    path.rsplit('/')
        .next()
        .filter(|n| !n.is_empty())
        .unwrap_or("source.bin")
        .to_string()
}

fn map_publish_error(e: PublishError) -> PipelineError {
    match e {
        PublishError::Upload(inner) => PipelineError::UploadFailed(inner.to_string()),
        other => PipelineError::Internal(other.to_string()),
    }
}

/// One variant per failure kind the HTTP boundary must distinguish. The
/// status-code mapping in the handler matches exhaustively on this.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("{0}")]
    BadRequest(String),
    #[error("download failed: {0}")]
    DownloadFailed(String),
    #[error("transcode failed: {0}")]
    TranscodeFailed(#[from] TranscodeError),
    #[error("transcription failed: {0}")]
    TranscribeFailed(#[from] RecognitionError),
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("internal error: {0}")]
    Internal(String),
}
