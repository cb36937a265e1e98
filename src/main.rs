use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use tawau::application::services::{PipelineConfig, PipelineService};
use tawau::infrastructure::observability::{init_tracing, TracingConfig};
use tawau::infrastructure::recognition::RecognitionEngineFactory;
use tawau::infrastructure::storage::StorageGatewayFactory;
use tawau::infrastructure::transcode::FfmpegTranscoder;
use tawau::presentation::{create_router, AppState, Settings, INSECURE_DEFAULT_API_KEY};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env().map_err(anyhow::Error::msg)?;

    init_tracing(TracingConfig::default(), settings.server.port);

    if settings.pipeline.api_key == INSECURE_DEFAULT_API_KEY {
        tracing::warn!("PROCESS_API_KEY is the insecure default; override it in any real deployment");
    }

    let gateway = StorageGatewayFactory::create(&settings.storage)
        .context("Failed to create storage gateway")?;

    let recognizer = RecognitionEngineFactory::create(&settings.recognition)
        .context("Failed to create recognition engine")?;

    let transcoder = Arc::new(FfmpegTranscoder::new(settings.pipeline.ffmpeg_path.clone()));

    let pipeline = Arc::new(PipelineService::new(
        gateway,
        transcoder,
        recognizer,
        PipelineConfig {
            api_key: settings.pipeline.api_key.clone(),
            raw_bucket: settings.buckets.raw.clone(),
            processed_bucket: settings.buckets.processed.clone(),
            transcripts_bucket: settings.buckets.transcripts.clone(),
            work_dir: settings.pipeline.work_dir.clone(),
        },
    ));

    let router = create_router(AppState { pipeline });

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
