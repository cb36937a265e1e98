mod artifact_publisher;
mod pipeline_service;

pub use artifact_publisher::{ArtifactPublisher, PublishError};
pub use pipeline_service::{
    PipelineConfig, PipelineError, PipelineService, ProcessOutcome, ProcessRequest,
};
