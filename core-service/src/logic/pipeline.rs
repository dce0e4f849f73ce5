//! Diagnostic Pipeline
//!
//! validate -> features -> classify -> compose. Validation always runs
//! before the model is touched, so bad input never triggers a model load.

use serde_json::{Map, Value};

use super::diagnosis::{compose, DiagnosticReport};
use super::features::FeatureVector;
use super::measurement::{validate, Measurement};
use super::model::{InferenceError, SharedModel};
use crate::error::{DiagnosticError, DiagnosticResult};

/// Run the full pipeline on a raw request body
pub fn diagnose(raw: &Map<String, Value>, model: &SharedModel) -> DiagnosticResult<DiagnosticReport> {
    let measurement = validate(raw)?;
    diagnose_measurement(&measurement, model)
}

/// Run the pipeline on an already-validated measurement
pub fn diagnose_measurement(
    measurement: &Measurement,
    model: &SharedModel,
) -> DiagnosticResult<DiagnosticReport> {
    let classifier = model
        .get()
        .map_err(|e| DiagnosticError::ModelUnavailable(e.to_string()))?;

    let features = FeatureVector::from_measurement(measurement);
    log::debug!("Features: {}", features.to_log_entry());

    let classification = model
        .predict_with(classifier.as_ref(), &features)
        .map_err(classification_failure)?;

    log::debug!(
        "Predicted {} ({:.3})",
        classification.class,
        classification.probability(classification.class)
    );

    Ok(compose(measurement, &classification))
}

fn classification_failure(err: InferenceError) -> DiagnosticError {
    DiagnosticError::ClassificationFailure(err.to_string())
}
