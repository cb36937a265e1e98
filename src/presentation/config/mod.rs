mod settings;

pub use settings::{
    BucketSettings, PipelineSettings, RecognitionProviderSetting, RecognitionSettings,
    ServerSettings, Settings, StorageBackendSetting, StorageSettings, INSECURE_DEFAULT_API_KEY,
};
