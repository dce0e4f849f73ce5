//! Diagnosis Types

use serde::{Deserialize, Serialize};

use crate::logic::measurement::Measurement;

/// Condition on the raw inputs flagged independently of the prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskFactor {
    #[serde(rename = "Low voltage")]
    LowVoltage,
    #[serde(rename = "High age")]
    HighAge,
    #[serde(rename = "High resistance")]
    HighResistance,
    #[serde(rename = "Extreme temperature")]
    ExtremeTemperature,
}

impl RiskFactor {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskFactor::LowVoltage => "Low voltage",
            RiskFactor::HighAge => "High age",
            RiskFactor::HighResistance => "High resistance",
            RiskFactor::ExtremeTemperature => "Extreme temperature",
        }
    }
}

impl std::fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-class percentages, one decimal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub healthy: f64,
    pub weak: f64,
    pub failed: f64,
}

impl ClassProbabilities {
    /// Sum of the three percentages, to one decimal
    pub fn total(&self) -> f64 {
        ((self.healthy + self.weak + self.failed) * 10.0).round() / 10.0
    }
}

/// Response body for a successful diagnosis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    /// e.g. "Healthy ✅"
    pub status: String,
    /// Raw class label (0, 1, 2)
    pub prediction: u8,
    /// Probability of the predicted class, percent
    pub confidence: f64,
    pub probabilities: ClassProbabilities,
    pub risk_factors: Vec<RiskFactor>,
    pub recommendations: Vec<String>,
    pub input_values: Measurement,
}
