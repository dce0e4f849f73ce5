//! Pipeline error taxonomy

use thiserror::Error;

pub type DiagnosticResult<T> = Result<T, DiagnosticError>;

/// How a caller should classify a failed request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller sent something unusable
    BadRequest,
    /// Model artifacts could not be loaded
    ServiceUnavailable,
    /// Classification itself failed
    Internal,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiagnosticError {
    // Validation errors
    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Invalid number format for field: {0}")]
    InvalidFormat(String),

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
    },

    #[error("Invalid request: {0}")]
    MalformedRequest(String),

    // Model errors
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Prediction failed: {0}")]
    ClassificationFailure(String),
}

impl DiagnosticError {
    pub fn out_of_range(field: &str, min: f64, max: f64) -> Self {
        DiagnosticError::OutOfRange {
            field: field.to_string(),
            min,
            max,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            DiagnosticError::MissingField(_)
            | DiagnosticError::InvalidFormat(_)
            | DiagnosticError::OutOfRange { .. }
            | DiagnosticError::MalformedRequest(_) => ErrorCategory::BadRequest,
            DiagnosticError::ModelUnavailable(_) => ErrorCategory::ServiceUnavailable,
            DiagnosticError::ClassificationFailure(_) => ErrorCategory::Internal,
        }
    }
}
