use std::env;
use std::path::PathBuf;

/// Shared secret shipped as a default so a fresh checkout runs; any real
/// deployment must override PROCESS_API_KEY.
pub const INSECURE_DEFAULT_API_KEY: &str = "changeme";

#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub buckets: BucketSettings,
    pub pipeline: PipelineSettings,
    pub recognition: RecognitionSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub backend: StorageBackendSetting,
    pub endpoint: Option<String>,
    pub service_key: Option<String>,
    pub local_root: String,
}

#[derive(Debug, Clone)]
pub struct BucketSettings {
    pub raw: String,
    pub processed: String,
    pub transcripts: String,
}

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub api_key: String,
    pub ffmpeg_path: String,
    pub work_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct RecognitionSettings {
    pub provider: RecognitionProviderSetting,
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackendSetting {
    Http,
    Local,
}

impl TryFrom<String> for StorageBackendSetting {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "local" => Ok(Self::Local),
            other => Err(format!(
                "Invalid storage backend: {}. Expected: http or local",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognitionProviderSetting {
    Remote,
    Local,
}

impl TryFrom<String> for RecognitionProviderSetting {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "remote" => Ok(Self::Remote),
            "local" => Ok(Self::Local),
            other => Err(format!(
                "Invalid recognition provider: {}. Expected: remote or local",
                other
            )),
        }
    }
}

impl Settings {
    /// Assemble settings from the environment, with defaults for everything
    /// except remote credentials.
    pub fn from_env() -> Result<Self, String> {
        let backend = env_or("STORAGE_BACKEND", "http").try_into()?;
        let provider = env_or("RECOGNITION_PROVIDER", "remote").try_into()?;

        let port = env_or("SERVER_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| format!("Invalid SERVER_PORT: {}", e))?;

        let work_dir = env::var("WORK_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| env::temp_dir());

        Ok(Self {
            server: ServerSettings { port },
            storage: StorageSettings {
                backend,
                endpoint: env::var("STORAGE_ENDPOINT").ok(),
                service_key: env::var("STORAGE_KEY").ok(),
                local_root: env_or("STORAGE_LOCAL_ROOT", "./storage"),
            },
            buckets: BucketSettings {
                raw: env_or("RAW_BUCKET", "raw"),
                processed: env_or("PROCESSED_BUCKET", "processed"),
                transcripts: env_or("TRANSCRIPTS_BUCKET", "transcripts"),
            },
            pipeline: PipelineSettings {
                api_key: env_or("PROCESS_API_KEY", INSECURE_DEFAULT_API_KEY),
                ffmpeg_path: env_or("FFMPEG_PATH", "ffmpeg"),
                work_dir,
            },
            recognition: RecognitionSettings {
                provider,
                model: env_or("RECOGNITION_MODEL", "base"),
                api_key: env::var("RECOGNITION_API_KEY").ok(),
                base_url: env::var("RECOGNITION_BASE_URL").ok(),
                model_dir: PathBuf::from(env_or("MODEL_DIR", "./models")),
            },
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
