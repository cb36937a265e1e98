use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use tawau::application::ports::StorageGateway;
use tawau::application::services::{PipelineConfig, PipelineService};
use tawau::infrastructure::recognition::MockRecognizer;
use tawau::infrastructure::storage::MockStorageGateway;
use tawau::infrastructure::transcode::MockTranscoder;
use tawau::presentation::{create_router, AppState};

const TEST_API_KEY: &str = "secret";

struct TestApp {
    router: Router,
    gateway: Arc<MockStorageGateway>,
    _work_dir: tempfile::TempDir,
}

fn build_app(gateway: MockStorageGateway, transcoder: MockTranscoder) -> TestApp {
    let work_dir = tempfile::TempDir::new().unwrap();
    let gateway = Arc::new(gateway);

    let pipeline = Arc::new(PipelineService::new(
        Arc::clone(&gateway) as Arc<dyn StorageGateway>,
        Arc::new(transcoder),
        Arc::new(MockRecognizer::returning(MockRecognizer::sample_transcript())),
        PipelineConfig {
            api_key: TEST_API_KEY.to_string(),
            raw_bucket: "raw".to_string(),
            processed_bucket: "processed".to_string(),
            transcripts_bucket: "transcripts".to_string(),
            work_dir: work_dir.path().to_path_buf(),
        },
    ));

    TestApp {
        router: create_router(AppState { pipeline }),
        gateway,
        _work_dir: work_dir,
    }
}

fn seeded_app() -> TestApp {
    build_app(
        MockStorageGateway::new().with_object("raw", "clip1/a.webm", b"raw video bytes"),
        MockTranscoder::new(2),
    )
}

fn process_request(api_key: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/process")
        .header("content-type", "application/json");
    if let Some(key) = api_key {
        builder = builder.header("x-api-key", key);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn given_health_request_then_ok_status() {
    let app = seeded_app();

    let response = app
        .router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn given_missing_api_key_then_unauthorized_and_no_collaborator_calls() {
    let app = seeded_app();

    let response = app
        .router
        .oneshot(process_request(
            None,
            r#"{"rawPath":"clip1/a.webm","processedPrefix":"sessions/42"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.gateway.call_count(), 0);
}

#[tokio::test]
async fn given_wrong_api_key_then_unauthorized() {
    let app = seeded_app();

    let response = app
        .router
        .oneshot(process_request(
            Some("wrong"),
            r#"{"rawPath":"clip1/a.webm","processedPrefix":"sessions/42"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn given_missing_processed_prefix_then_bad_request() {
    let app = seeded_app();

    let response = app
        .router
        .oneshot(process_request(
            Some(TEST_API_KEY),
            r#"{"rawPath":"clip1/a.webm"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("processedPrefix"));
}

#[tokio::test]
async fn given_valid_request_then_success_body_with_request_id() {
    let app = seeded_app();

    let response = app
        .router
        .oneshot(process_request(
            Some(TEST_API_KEY),
            r#"{"rawPath":"clip1/a.webm","processedPrefix":"sessions/42"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let json = body_json(response).await;
    assert_eq!(json["processed_path"], "sessions/42/master.m3u8");
    assert_eq!(json["transcript_json"], "sessions/42.json");
    assert_eq!(json["transcript_txt"], "sessions/42.txt");
    assert_eq!(json["duration"], 12.5);
    assert_eq!(json["language"], "en");
    assert!(!json["request_id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn given_inbound_request_id_header_then_it_is_propagated() {
    let app = seeded_app();

    let request = Request::builder()
        .method("POST")
        .uri("/process")
        .header("content-type", "application/json")
        .header("x-api-key", TEST_API_KEY)
        .header("x-request-id", "corr-123")
        .body(Body::from(
            r#"{"rawPath":"clip1/a.webm","processedPrefix":"sessions/42"}"#,
        ))
        .unwrap();

    let response = app.router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-request-id"], "corr-123");
    let json = body_json(response).await;
    assert_eq!(json["request_id"], "corr-123");
}

#[tokio::test]
async fn given_upstream_download_failure_then_bad_gateway() {
    let app = build_app(
        MockStorageGateway::new().failing_downloads(),
        MockTranscoder::new(2),
    );

    let response = app
        .router
        .oneshot(process_request(
            Some(TEST_API_KEY),
            r#"{"rawPath":"clip1/a.webm","processedPrefix":"sessions/42"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn given_transcoder_failure_then_internal_server_error() {
    let app = build_app(
        MockStorageGateway::new().with_object("raw", "clip1/a.webm", b"raw video bytes"),
        MockTranscoder::failing(),
    );

    let response = app
        .router
        .oneshot(process_request(
            Some(TEST_API_KEY),
            r#"{"rawPath":"clip1/a.webm","processedPrefix":"sessions/42"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("transcode"));
}
