//! Serverless invocation handler
//!
//! Routes a function-style event the same way a serverless platform
//! would: OPTIONS preflight, health on GET, prediction on POST.

use axum::{extract::{rejection::JsonRejection, State}, Json};
use serde_json::Value;

use crate::handlers::predict::run_pipeline;
use crate::models::{HealthResponse, ServerlessEvent, ServerlessResponse};
use crate::{AppError, AppResult, AppState};

/// POST /api/invoke
pub async fn invoke(
    State(state): State<AppState>,
    payload: Result<Json<ServerlessEvent>, JsonRejection>,
) -> AppResult<Json<ServerlessResponse>> {
    let Json(event) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    Ok(Json(handle_event(&state, event).await))
}

pub async fn handle_event(state: &AppState, event: ServerlessEvent) -> ServerlessResponse {
    let method = event.http_method.to_ascii_uppercase();
    tracing::debug!("Serverless event: {} {}", method, event.path);

    if method == "OPTIONS" {
        return ServerlessResponse::preflight();
    }

    if method == "GET" || event.path.ends_with("/health") {
        return ServerlessResponse::json(200, &HealthResponse::snapshot(&state.model));
    }

    if method != "POST" {
        return error_response(AppError::MethodNotAllowed);
    }

    let body = event.body.as_deref().unwrap_or("{}");
    let parsed: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => return error_response(AppError::BadRequest(format!("Invalid JSON body: {}", e))),
    };

    match run_pipeline(state, parsed).await {
        Ok(report) => ServerlessResponse::json(200, &report),
        Err(err) => error_response(err),
    }
}

fn error_response(err: AppError) -> ServerlessResponse {
    let (status, body) = err.to_parts();
    ServerlessResponse::json(status.as_u16(), &body)
}
