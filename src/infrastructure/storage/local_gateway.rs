use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};

use crate::application::ports::{StorageGateway, StorageGatewayError};

/// Filesystem-backed gateway for development and tests. Buckets map to
/// directories under the base path; content types are accepted and
/// discarded since the filesystem carries none. Direct URL fetches are
/// unsupported and surface as download failures.
pub struct LocalStorageGateway {
    inner: Arc<LocalFileSystem>,
}

impl LocalStorageGateway {
    pub fn new(base_path: PathBuf) -> Result<Self, StorageGatewayError> {
        std::fs::create_dir_all(&base_path)
            .map_err(|e| StorageGatewayError::UploadFailed(e.to_string()))?;
        let fs = LocalFileSystem::new_with_prefix(base_path)
            .map_err(|e| StorageGatewayError::UploadFailed(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
        })
    }

    fn store_path(bucket: &str, path: &str) -> StorePath {
        StorePath::from(format!("{}/{}", bucket, path))
    }
}

#[async_trait]
impl StorageGateway for LocalStorageGateway {
    async fn get(&self, bucket: &str, path: &str) -> Result<Vec<u8>, StorageGatewayError> {
        let store_path = Self::store_path(bucket, path);
        let result = self
            .inner
            .get(&store_path)
            .await
            .map_err(|e| StorageGatewayError::DownloadFailed(e.to_string()))?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| StorageGatewayError::DownloadFailed(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    async fn get_url(&self, url: &str) -> Result<Vec<u8>, StorageGatewayError> {
        Err(StorageGatewayError::DownloadFailed(format!(
            "local storage backend cannot fetch URLs: {}",
            url
        )))
    }

    async fn put(
        &self,
        bucket: &str,
        path: &str,
        content: Bytes,
        _content_type: &str,
    ) -> Result<(), StorageGatewayError> {
        let store_path = Self::store_path(bucket, path);
        self.inner
            .put(&store_path, PutPayload::from(content))
            .await
            .map_err(|e| StorageGatewayError::UploadFailed(e.to_string()))?;
        Ok(())
    }
}
