//! Feature Vector - Core data structure for ML input

use serde::{Deserialize, Serialize};

use super::layout::{FEATURE_COUNT, FEATURE_LAYOUT};
use crate::logic::measurement::Measurement;

/// Feature values in the order defined by `FEATURE_LAYOUT`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: [f32; FEATURE_COUNT],
}

impl FeatureVector {
    /// Build the model input for one measurement (pure, total)
    pub fn from_measurement(m: &Measurement) -> Self {
        Self {
            values: [
                m.voltage as f32,
                m.current as f32,
                m.temperature as f32,
                m.age_months as f32,
                m.resistance as f32,
            ],
        }
    }

    #[cfg(test)]
    pub(crate) fn from_values(values: [f32; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    pub fn as_array(&self) -> &[f32; FEATURE_COUNT] {
        &self.values
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        let named: serde_json::Map<String, serde_json::Value> = FEATURE_LAYOUT
            .iter()
            .zip(self.values.iter())
            .map(|(name, v)| (name.to_string(), serde_json::json!(v)))
            .collect();
        serde_json::Value::Object(named)
    }
}
