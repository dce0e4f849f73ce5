//! Model configuration

use std::env;
use std::path::PathBuf;

use crate::constants::*;
use crate::logic::model::{FileModelSource, ModelSource, RemoteModelSource};

/// Where the classifier and scaler artifacts come from
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Local ONNX classifier path
    pub model_path: PathBuf,

    /// Local scaler parameters path (JSON)
    pub scaler_path: PathBuf,

    /// Optional base URL; when set, artifacts are downloaded into `cache_dir`
    pub remote_base_url: Option<String>,

    /// Cache directory for downloaded artifacts
    pub cache_dir: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            scaler_path: PathBuf::from(DEFAULT_SCALER_PATH),
            remote_base_url: None,
            cache_dir: default_cache_dir(),
        }
    }
}

impl ModelConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            model_path: env::var(ENV_MODEL_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),

            scaler_path: env::var(ENV_SCALER_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.scaler_path),

            remote_base_url: env::var(ENV_MODEL_URL)
                .ok()
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty()),

            cache_dir: env::var(ENV_MODEL_CACHE_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_dir),
        }
    }

    /// Build the model source this configuration describes
    pub fn into_source(self) -> Box<dyn ModelSource> {
        match self.remote_base_url {
            Some(base_url) => Box::new(RemoteModelSource::new(base_url, self.cache_dir)),
            None => Box::new(FileModelSource::new(self.model_path, self.scaler_path)),
        }
    }

    /// Human-readable description for startup logs
    pub fn describe(&self) -> String {
        match &self.remote_base_url {
            Some(url) => format!("{} (cached in {})", url, self.cache_dir.display()),
            None => format!("{} + {}", self.model_path.display(), self.scaler_path.display()),
        }
    }
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join(CACHE_DIR_NAME)
}
