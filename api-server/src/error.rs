//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use battery_health_core::{DiagnosticError, ErrorCategory};
use serde_json::{json, Value};
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    // Pipeline errors (validation, model, classification)
    #[error(transparent)]
    Diagnostic(#[from] DiagnosticError),

    // Request could not be decoded at all
    #[error("{0}")]
    BadRequest(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    // Generic errors
    #[error("{0}")]
    InternalError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Diagnostic(err) => match err.category() {
                ErrorCategory::BadRequest => StatusCode::BAD_REQUEST,
                ErrorCategory::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
                ErrorCategory::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show callers; server-side causes are logged instead
    pub fn public_message(&self) -> String {
        match self {
            AppError::Diagnostic(DiagnosticError::ModelUnavailable(cause)) => {
                tracing::error!("Model unavailable: {}", cause);
                "Failed to load ML models".to_string()
            }
            AppError::Diagnostic(err @ DiagnosticError::ClassificationFailure(_)) => {
                tracing::error!("{}", err);
                err.to_string()
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Status plus JSON body, shared by axum responses and the serverless adapter
    pub fn to_parts(&self) -> (StatusCode, Value) {
        let status = self.status_code();
        let body = json!({
            "error": self.public_message(),
            "status": status.as_u16()
        });
        (status, body)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.to_parts();
        (status, Json(body)).into_response()
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InternalError(format!("prediction task failed: {}", err))
    }
}
