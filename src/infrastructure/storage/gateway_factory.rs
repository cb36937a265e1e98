use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{StorageGateway, StorageGatewayError};
use crate::presentation::config::{StorageBackendSetting, StorageSettings};

use super::http_gateway::HttpStorageGateway;
use super::local_gateway::LocalStorageGateway;

pub struct StorageGatewayFactory;

impl StorageGatewayFactory {
    pub fn create(
        settings: &StorageSettings,
    ) -> Result<Arc<dyn StorageGateway>, StorageGatewayError> {
        match settings.backend {
            StorageBackendSetting::Http => {
                let endpoint = settings.endpoint.as_deref().ok_or_else(|| {
                    StorageGatewayError::DownloadFailed("STORAGE_ENDPOINT required".into())
                })?;
                let key = settings.service_key.as_deref().ok_or_else(|| {
                    StorageGatewayError::DownloadFailed("STORAGE_KEY required".into())
                })?;
                Ok(Arc::new(HttpStorageGateway::new(endpoint, key)))
            }
            StorageBackendSetting::Local => {
                let root = PathBuf::from(&settings.local_root);
                let gateway = LocalStorageGateway::new(root)?;
                Ok(Arc::new(gateway))
            }
        }
    }
}
