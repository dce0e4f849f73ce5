//! Feature Scaler
//!
//! Standardization parameters exported from training:
//! `scaled = (x - mean) / scale`, per feature, in layout order.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::inference::InferenceError;
use crate::logic::features::{validate_layout, FeatureVector, FEATURE_COUNT};

/// On-disk representation
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScalerFile {
    mean: Vec<f64>,
    scale: Vec<f64>,
    #[serde(default)]
    feature_names: Option<Vec<String>>,
}

/// Fitted standardization transform
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl StandardScaler {
    pub fn new(mean: [f64; FEATURE_COUNT], scale: [f64; FEATURE_COUNT]) -> Result<Self, InferenceError> {
        if mean.iter().chain(scale.iter()).any(|v| !v.is_finite()) {
            return Err(InferenceError::Scaler("non-finite parameter".to_string()));
        }
        Ok(Self { mean, scale })
    }

    pub fn from_json(json: &str) -> Result<Self, InferenceError> {
        let file: ScalerFile = serde_json::from_str(json)
            .map_err(|e| InferenceError::Scaler(format!("invalid scaler file: {}", e)))?;

        if let Some(names) = &file.feature_names {
            validate_layout(names.as_slice())?;
        }

        let mean = to_array(&file.mean, "mean")?;
        let scale = to_array(&file.scale, "scale")?;
        Self::new(mean, scale)
    }

    pub fn from_file(path: &Path) -> Result<Self, InferenceError> {
        if !path.exists() {
            return Err(InferenceError::NotFound(path.display().to_string()));
        }
        let json = std::fs::read_to_string(path)
            .map_err(|e| InferenceError::Scaler(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    pub fn transform(&self, features: &FeatureVector) -> [f32; FEATURE_COUNT] {
        let mut scaled = [0.0f32; FEATURE_COUNT];
        for (i, &value) in features.as_array().iter().enumerate() {
            // Constant columns are fitted with scale 0; leave them centered only
            let scale = if self.scale[i] == 0.0 { 1.0 } else { self.scale[i] };
            scaled[i] = ((value as f64 - self.mean[i]) / scale) as f32;
        }
        scaled
    }
}

fn to_array(values: &[f64], name: &str) -> Result<[f64; FEATURE_COUNT], InferenceError> {
    values.try_into().map_err(|_| {
        InferenceError::Scaler(format!(
            "{} has {} values, expected {}",
            name,
            values.len(),
            FEATURE_COUNT
        ))
    })
}
