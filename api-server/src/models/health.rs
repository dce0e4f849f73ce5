//! Health check model

use serde::{Deserialize, Serialize};

use battery_health_core::constants::{APP_VERSION, SERVICE_NAME};
use battery_health_core::SharedModel;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub model_loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_checksum: Option<String>,
    pub inference_count: u64,
    pub avg_latency_ms: f32,
    pub timestamp: i64,
}

impl HealthResponse {
    /// Current service health; never triggers a model load
    pub fn snapshot(model: &SharedModel) -> Self {
        let engine = model.status();

        Self {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
            version: APP_VERSION.to_string(),
            model_loaded: engine.model_loaded,
            model_checksum: engine.metadata.map(|m| m.checksum),
            inference_count: engine.inference_count,
            avg_latency_ms: engine.avg_latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}
