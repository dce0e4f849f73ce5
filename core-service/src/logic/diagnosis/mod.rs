//! Diagnosis Module
//!
//! Turns a classification plus the raw measurement into the report users see.
//!
//! ## Structure
//! - `types`: DiagnosticReport, RiskFactor
//! - `rules`: thresholds and recommendation tables
//! - `composer`: report assembly

pub mod types;
pub mod rules;
pub mod composer;

pub use types::{ClassProbabilities, DiagnosticReport, RiskFactor};
pub use composer::{assess_risk_factors, compose, recommendations_for, round1};
