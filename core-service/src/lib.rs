//! Battery Health Core
//!
//! Shared diagnostic pipeline used by every entry point (REST API,
//! serverless adapter, demo CLI).
//!
//! ```text
//! raw JSON ──▶ validator ──▶ features ──▶ model (scaler + classifier) ──▶ diagnosis ──▶ report
//! ```

pub mod constants;
pub mod config;
pub mod error;
pub mod logic;
pub mod demo;

pub use config::ModelConfig;
pub use error::{DiagnosticError, ErrorCategory};
pub use logic::diagnosis::{compose, DiagnosticReport, RiskFactor};
pub use logic::features::{FeatureVector, FEATURE_COUNT, FEATURE_LAYOUT};
pub use logic::measurement::{validate, Measurement};
pub use logic::model::{
    ClassificationResult, Classifier, HealthClass, InferenceError, ModelMetadata, ModelSource,
    SharedModel,
};
pub use logic::pipeline::{diagnose, diagnose_measurement};
