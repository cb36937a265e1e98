use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use crate::application::ports::{StorageGateway, StorageGatewayError};

/// One recorded upsert, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedPut {
    pub bucket: String,
    pub path: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

/// In-memory gateway for tests: seeded objects, recorded uploads, optional
/// injected failures, and a total call counter.
#[derive(Default)]
pub struct MockStorageGateway {
    objects: Mutex<HashMap<(String, String), Vec<u8>>>,
    puts: Mutex<Vec<RecordedPut>>,
    calls: AtomicUsize,
    fail_downloads: bool,
    fail_uploads: bool,
}

impl MockStorageGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(self, bucket: &str, path: &str, content: &[u8]) -> Self {
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), path.to_string()), content.to_vec());
        self
    }

    pub fn failing_downloads(mut self) -> Self {
        self.fail_downloads = true;
        self
    }

    pub fn failing_uploads(mut self) -> Self {
        self.fail_uploads = true;
        self
    }

    pub fn recorded_puts(&self) -> Vec<RecordedPut> {
        self.puts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StorageGateway for MockStorageGateway {
    async fn get(&self, bucket: &str, path: &str) -> Result<Vec<u8>, StorageGatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_downloads {
            return Err(StorageGatewayError::DownloadFailed(
                "injected download failure".to_string(),
            ));
        }
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), path.to_string()))
            .cloned()
            .ok_or_else(|| {
                StorageGatewayError::DownloadFailed(format!("no such object: {}/{}", bucket, path))
            })
    }

    async fn get_url(&self, url: &str) -> Result<Vec<u8>, StorageGatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_downloads {
            return Err(StorageGatewayError::DownloadFailed(
                "injected download failure".to_string(),
            ));
        }
        Err(StorageGatewayError::DownloadFailed(format!(
            "mock gateway has no URL reach: {}",
            url
        )))
    }

    async fn put(
        &self,
        bucket: &str,
        path: &str,
        content: Bytes,
        content_type: &str,
    ) -> Result<(), StorageGatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_uploads {
            return Err(StorageGatewayError::UploadFailed(
                "injected upload failure".to_string(),
            ));
        }
        self.objects.lock().unwrap().insert(
            (bucket.to_string(), path.to_string()),
            content.to_vec(),
        );
        self.puts.lock().unwrap().push(RecordedPut {
            bucket: bucket.to_string(),
            path: path.to_string(),
            content_type: content_type.to_string(),
            content: content.to_vec(),
        });
        Ok(())
    }
}
