//! Central Configuration Constants
//!
//! Single source of truth for configuration defaults.

/// Default ONNX classifier location (relative to the working directory)
pub const DEFAULT_MODEL_PATH: &str = "models/battery_model.onnx";

/// Default scaler parameters location
pub const DEFAULT_SCALER_PATH: &str = "models/battery_scaler.json";

/// File names used when artifacts are fetched from a remote base URL
pub const MODEL_FILE_NAME: &str = "battery_model.onnx";
pub const SCALER_FILE_NAME: &str = "battery_scaler.json";

/// Cache sub-directory under the OS cache dir
pub const CACHE_DIR_NAME: &str = "battery-health";

/// Download timeout for remote artifacts (seconds)
pub const DOWNLOAD_TIMEOUT_SECS: u64 = 60;

/// Service name reported by health checks
pub const SERVICE_NAME: &str = "Battery Health Prediction API";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// Environment variable names
// ============================================

pub const ENV_MODEL_PATH: &str = "BATTERY_MODEL_PATH";
pub const ENV_SCALER_PATH: &str = "BATTERY_SCALER_PATH";
pub const ENV_MODEL_URL: &str = "BATTERY_MODEL_URL";
pub const ENV_MODEL_CACHE_DIR: &str = "BATTERY_MODEL_CACHE_DIR";
