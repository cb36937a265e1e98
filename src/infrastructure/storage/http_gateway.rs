use async_trait::async_trait;
use bytes::Bytes;

use crate::application::ports::{StorageGateway, StorageGatewayError};

/// Upstream error bodies are truncated to this many bytes before they are
/// folded into gateway errors, to keep logs and error payloads bounded.
const BODY_EXCERPT_LEN: usize = 512;

/// Storage gateway speaking the `/storage/v1/object` REST dialect with
/// bearer authentication and upsert uploads.
pub struct HttpStorageGateway {
    client: reqwest::Client,
    endpoint: String,
    service_key: String,
}

impl HttpStorageGateway {
    pub fn new(endpoint: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            service_key: service_key.into(),
        }
    }

    fn object_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.endpoint, bucket, path)
    }
}

#[async_trait]
impl StorageGateway for HttpStorageGateway {
    async fn get(&self, bucket: &str, path: &str) -> Result<Vec<u8>, StorageGatewayError> {
        let url = self.object_url(bucket, path);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.service_key)
            .send()
            .await
            .map_err(|e| StorageGatewayError::DownloadFailed(format!("{}: {}", url, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = body_excerpt(response).await;
            return Err(StorageGatewayError::DownloadFailed(format!(
                "{}: status {}: {}",
                url, status, body
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StorageGatewayError::DownloadFailed(format!("reading body: {}", e)))?;

        Ok(bytes.to_vec())
    }

    async fn get_url(&self, url: &str) -> Result<Vec<u8>, StorageGatewayError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| StorageGatewayError::DownloadFailed(format!("{}: {}", url, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = body_excerpt(response).await;
            return Err(StorageGatewayError::DownloadFailed(format!(
                "{}: status {}: {}",
                url, status, body
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StorageGatewayError::DownloadFailed(format!("reading body: {}", e)))?;

        Ok(bytes.to_vec())
    }

    async fn put(
        &self,
        bucket: &str,
        path: &str,
        content: Bytes,
        content_type: &str,
    ) -> Result<(), StorageGatewayError> {
        let url = self.object_url(bucket, path);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.service_key)
            .header("content-type", content_type)
            .header("x-upsert", "true")
            .body(content)
            .send()
            .await
            .map_err(|e| StorageGatewayError::UploadFailed(format!("{}: {}", url, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = body_excerpt(response).await;
            return Err(StorageGatewayError::UploadFailed(format!(
                "{}: status {}: {}",
                url, status, body
            )));
        }

        Ok(())
    }
}

async fn body_excerpt(response: reqwest::Response) -> String {
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unreadable body".to_string());
    let mut excerpt: String = body.chars().take(BODY_EXCERPT_LEN).collect();
    if excerpt.len() < body.len() {
        excerpt.push_str("...");
    }
    excerpt
}
