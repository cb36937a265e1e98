use bytes::Bytes;

use tawau::application::ports::StorageGateway;
use tawau::infrastructure::storage::LocalStorageGateway;

fn create_test_gateway() -> (tempfile::TempDir, LocalStorageGateway) {
    let dir = tempfile::TempDir::new().unwrap();
    let gateway = LocalStorageGateway::new(dir.path().to_path_buf()).unwrap();
    (dir, gateway)
}

#[tokio::test]
async fn given_stored_object_when_fetching_then_bytes_match_original() {
    let (_dir, gateway) = create_test_gateway();
    let content = b"playlist bytes";

    gateway
        .put("processed", "sessions/42/master.m3u8", Bytes::from(&content[..]), "application/vnd.apple.mpegurl")
        .await
        .unwrap();

    let fetched = gateway.get("processed", "sessions/42/master.m3u8").await.unwrap();
    assert_eq!(fetched, content);
}

#[tokio::test]
async fn given_existing_object_when_putting_again_then_content_replaced() {
    let (_dir, gateway) = create_test_gateway();

    gateway
        .put("transcripts", "42.txt", Bytes::from("first"), "text/plain; charset=utf-8")
        .await
        .unwrap();
    gateway
        .put("transcripts", "42.txt", Bytes::from("second"), "text/plain; charset=utf-8")
        .await
        .unwrap();

    let fetched = gateway.get("transcripts", "42.txt").await.unwrap();
    assert_eq!(fetched, b"second");
}

#[tokio::test]
async fn given_missing_object_when_fetching_then_download_failed() {
    let (_dir, gateway) = create_test_gateway();

    let result = gateway.get("raw", "nope.webm").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn given_url_fetch_when_using_local_backend_then_download_failed() {
    let (_dir, gateway) = create_test_gateway();

    let result = gateway.get_url("https://host/storage/v1/object/sign/raw/a.webm").await;
    assert!(result.is_err());
}
