//! Model Types
//!
//! Data structures exchanged with the classifier. No inference logic here.

use serde::{Deserialize, Serialize};

use super::inference::InferenceError;

/// Number of health classes the classifier distinguishes
pub const CLASS_COUNT: usize = 3;

/// Allowed drift of the probability sum away from 1.0
pub const PROBABILITY_SUM_TOLERANCE: f64 = 0.01;

// ============================================================================
// HEALTH CLASS
// ============================================================================

/// Classifier output classes, in label order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthClass {
    Healthy,
    Weak,
    Failed,
}

impl HealthClass {
    pub const ALL: [HealthClass; CLASS_COUNT] =
        [HealthClass::Healthy, HealthClass::Weak, HealthClass::Failed];

    /// Map a raw classifier label; anything outside 0..=2 is rejected
    pub fn from_label(label: i64) -> Option<Self> {
        match label {
            0 => Some(HealthClass::Healthy),
            1 => Some(HealthClass::Weak),
            2 => Some(HealthClass::Failed),
            _ => None,
        }
    }

    pub fn label(&self) -> u8 {
        match self {
            HealthClass::Healthy => 0,
            HealthClass::Weak => 1,
            HealthClass::Failed => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HealthClass::Healthy => "Healthy",
            HealthClass::Weak => "Weak",
            HealthClass::Failed => "Failed",
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            HealthClass::Healthy => "✅",
            HealthClass::Weak => "⚠️",
            HealthClass::Failed => "❌",
        }
    }

    /// Status string shown to users, e.g. "Healthy ✅"
    pub fn status(&self) -> String {
        format!("{} {}", self.name(), self.marker())
    }
}

impl std::fmt::Display for HealthClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// CLASSIFICATION RESULT
// ============================================================================

/// Predicted class plus the distribution over all classes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub class: HealthClass,
    /// Index-aligned with `HealthClass::label`
    pub probabilities: [f64; CLASS_COUNT],
}

impl ClassificationResult {
    /// Validate raw classifier output and renormalize it to sum to 1
    pub fn new(label: i64, probabilities: &[f32]) -> Result<Self, InferenceError> {
        let class = HealthClass::from_label(label)
            .ok_or_else(|| InferenceError::InvalidOutput(format!("unexpected class label {}", label)))?;

        if probabilities.len() != CLASS_COUNT {
            return Err(InferenceError::InvalidOutput(format!(
                "expected {} probabilities, got {}",
                CLASS_COUNT,
                probabilities.len()
            )));
        }

        let mut values = [0.0f64; CLASS_COUNT];
        for (slot, &p) in values.iter_mut().zip(probabilities) {
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(InferenceError::InvalidOutput(format!(
                    "probability {} outside [0, 1]",
                    p
                )));
            }
            *slot = p as f64;
        }

        let sum: f64 = values.iter().sum();
        if (sum - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
            return Err(InferenceError::InvalidOutput(format!(
                "probabilities sum to {:.4}",
                sum
            )));
        }

        // Exported models drift by float error; percentages must add up to 100
        for slot in values.iter_mut() {
            *slot /= sum;
        }

        Ok(Self {
            class,
            probabilities: values,
        })
    }

    /// Use the most probable class as the label (for models without a label output)
    pub fn from_probabilities(probabilities: &[f32]) -> Result<Self, InferenceError> {
        let label = probabilities
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i as i64)
            .ok_or_else(|| InferenceError::InvalidOutput("empty probability output".to_string()))?;

        Self::new(label, probabilities)
    }

    pub fn probability(&self, class: HealthClass) -> f64 {
        self.probabilities[class.label() as usize]
    }
}

// ============================================================================
// METADATA
// ============================================================================

/// Describes the loaded artifact pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub scaler_path: String,
    /// SHA-256 of the classifier artifact (hex)
    pub checksum: String,
    pub features: usize,
    pub runtime: String,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}
