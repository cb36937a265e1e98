use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::application::services::{PipelineError, ProcessRequest};
use crate::infrastructure::observability::RequestId;
use crate::presentation::state::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Deserialize)]
pub struct ProcessBody {
    #[serde(rename = "rawPath", default)]
    pub raw_path: Option<String>,
    #[serde(rename = "processedPrefix", default)]
    pub processed_prefix: Option<String>,
    #[serde(rename = "transcriptPrefix", default)]
    pub transcript_prefix: Option<String>,
}

#[derive(Serialize)]
pub struct ProcessResponse {
    pub processed_path: String,
    pub transcript_json: String,
    pub transcript_txt: String,
    pub duration: f64,
    pub language: Option<String>,
    pub request_id: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state, headers, body))]
pub async fn process_handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    headers: HeaderMap,
    Json(body): Json<ProcessBody>,
) -> impl IntoResponse {
    let api_key = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok());

    let request = ProcessRequest {
        raw_locator: body.raw_path.unwrap_or_default(),
        processed_prefix: body.processed_prefix.unwrap_or_default(),
        transcript_prefix: body.transcript_prefix,
    };

    match state.pipeline.process(request, api_key).await {
        Ok(outcome) => {
            tracing::info!(processed_path = %outcome.processed_path, "Pipeline completed");
            (
                StatusCode::OK,
                Json(ProcessResponse {
                    processed_path: outcome.processed_path,
                    transcript_json: outcome.transcript_json,
                    transcript_txt: outcome.transcript_txt,
                    duration: outcome.duration,
                    language: outcome.language,
                    request_id: request_id.0,
                }),
            )
                .into_response()
        }
        Err(e) => {
            let status = status_for(&e);
            (
                status,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Total mapping from pipeline failure kinds to response status codes.
fn status_for(error: &PipelineError) -> StatusCode {
    match error {
        PipelineError::Unauthorized => StatusCode::UNAUTHORIZED,
        PipelineError::BadRequest(_) => StatusCode::BAD_REQUEST,
        PipelineError::DownloadFailed(_) => StatusCode::BAD_GATEWAY,
        PipelineError::TranscodeFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        PipelineError::TranscribeFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        PipelineError::UploadFailed(_) => StatusCode::BAD_GATEWAY,
        PipelineError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
