//! Diagnostic Rules & Thresholds
//!
//! Constants only. Risk factors are judged on raw (unscaled) inputs.

use crate::logic::model::HealthClass;

// ============================================================================
// RISK THRESHOLDS
// ============================================================================

/// Below this voltage = "Low voltage"
pub const LOW_VOLTAGE_THRESHOLD: f64 = 12.0;

/// Above this age = "High age"
pub const HIGH_AGE_MONTHS: u32 = 48;

/// Above this resistance = "High resistance"
pub const HIGH_RESISTANCE_THRESHOLD: f64 = 0.05;

/// Outside [TEMPERATURE_MIN, TEMPERATURE_MAX] = "Extreme temperature"
///
/// Union of the two historical rules (> 35 °C, and < -10 °C or > 40 °C).
/// Pending confirmation from battery domain owners.
pub const TEMPERATURE_MIN: f64 = -10.0;
pub const TEMPERATURE_MAX: f64 = 35.0;

// ============================================================================
// RECOMMENDATIONS
// ============================================================================

pub const HEALTHY_RECOMMENDATIONS: &[&str] = &[
    "Battery is in good condition",
    "Regular maintenance recommended",
];

pub const WEAK_RECOMMENDATIONS: &[&str] = &[
    "Monitor battery performance closely",
    "Consider replacement soon",
    "Check charging system",
];

pub const FAILED_RECOMMENDATIONS: &[&str] = &[
    "Replace battery immediately",
    "Do not rely on this battery",
    "Check vehicle electrical system",
];

pub fn recommendation_table(class: HealthClass) -> &'static [&'static str] {
    match class {
        HealthClass::Healthy => HEALTHY_RECOMMENDATIONS,
        HealthClass::Weak => WEAK_RECOMMENDATIONS,
        HealthClass::Failed => FAILED_RECOMMENDATIONS,
    }
}
