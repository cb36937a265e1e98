pub mod config;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::{
    RecognitionProviderSetting, Settings, StorageBackendSetting, INSECURE_DEFAULT_API_KEY,
};
pub use router::create_router;
pub use state::AppState;
