//! Feature Layout - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the feature schema**
//!
//! The scaler and classifier artifacts were fitted on columns in exactly
//! this order. Reordering silently changes what the model sees.

use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in the vector
pub const FEATURE_LAYOUT: [&str; FEATURE_COUNT] = [
    "voltage",      // 0: Volts
    "current",      // 1: Amperes
    "temperature",  // 2: Degrees Celsius
    "age_months",   // 3: Battery age
    "resistance",   // 4: Internal resistance (ohms)
];

/// Total number of features
pub const FEATURE_COUNT: usize = 5;

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when an artifact declares a different column layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutMismatchError {
    pub expected: Vec<String>,
    pub actual: Vec<String>,
}

impl std::fmt::Display for LayoutMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Feature layout mismatch: expected [{}], got [{}]",
            self.expected.join(", "),
            self.actual.join(", ")
        )
    }
}

impl std::error::Error for LayoutMismatchError {}

/// Validate column names declared by a model artifact
pub fn validate_layout<S: AsRef<str>>(names: &[S]) -> Result<(), LayoutMismatchError> {
    let matches = names.len() == FEATURE_COUNT
        && names.iter().zip(FEATURE_LAYOUT.iter()).all(|(a, b)| a.as_ref() == *b);

    if matches {
        Ok(())
    } else {
        Err(LayoutMismatchError {
            expected: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
            actual: names.iter().map(|s| s.as_ref().to_string()).collect(),
        })
    }
}
