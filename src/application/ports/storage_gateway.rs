use async_trait::async_trait;
use bytes::Bytes;

/// Byte-level object storage capability: fetch and upsert content at a
/// bucket + path, or fetch a pre-authorized URL directly.
#[async_trait]
pub trait StorageGateway: Send + Sync {
    async fn get(&self, bucket: &str, path: &str) -> Result<Vec<u8>, StorageGatewayError>;

    /// Fetch a direct (typically signed) URL. Backends without HTTP reach
    /// report `DownloadFailed`.
    async fn get_url(&self, url: &str) -> Result<Vec<u8>, StorageGatewayError>;

    /// Upsert: creates the destination or replaces prior content, with no
    /// distinct "already exists" failure.
    async fn put(
        &self,
        bucket: &str,
        path: &str,
        content: Bytes,
        content_type: &str,
    ) -> Result<(), StorageGatewayError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageGatewayError {
    #[error("download failed: {0}")]
    DownloadFailed(String),
    #[error("upload failed: {0}")]
    UploadFailed(String),
}
