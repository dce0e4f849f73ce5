//! Prediction handler

use std::sync::Arc;

use axum::{extract::{rejection::JsonRejection, State}, Json};
use serde_json::Value;

use battery_health_core::{diagnose, DiagnosticError, DiagnosticReport};

use crate::{AppError, AppResult, AppState};

/// POST /api/predict
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<DiagnosticReport>> {
    let Json(body) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let report = run_pipeline(&state, body).await?;
    Ok(Json(report))
}

/// Validate, classify and compose off the async runtime
///
/// The first call may load the model from disk or network, and inference
/// is CPU-bound, so both run on the blocking pool.
pub async fn run_pipeline(state: &AppState, body: Value) -> AppResult<DiagnosticReport> {
    let raw = match body {
        Value::Object(map) => map,
        _ => {
            return Err(DiagnosticError::MalformedRequest(
                "request body must be a JSON object".to_string(),
            )
            .into())
        }
    };

    let model = Arc::clone(&state.model);
    let report = tokio::task::spawn_blocking(move || diagnose(&raw, &model)).await??;

    tracing::info!(
        status = %report.status,
        confidence = report.confidence,
        risk_factors = report.risk_factors.len(),
        "Prediction served"
    );

    Ok(report)
}
