//! GeoQuiz API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use geoquiz_core::error::DomainError;
use geoquiz_dataset::DatasetError;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The country table failed validation.
    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// The tracing subscriber or span exporter could not be installed.
    #[error("telemetry error: {0}")]
    Telemetry(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            DomainError::SessionNotFound(_) => (StatusCode::NOT_FOUND, "session_not_found"),
            DomainError::QuestionNotFound { .. } => (StatusCode::NOT_FOUND, "question_not_found"),
            DomainError::QuizCompleted(_) => (StatusCode::BAD_REQUEST, "quiz_completed"),
            DomainError::QuizIncomplete { .. } => (StatusCode::BAD_REQUEST, "quiz_incomplete"),
            DomainError::AlreadyAnswered { .. } => (StatusCode::CONFLICT, "already_answered"),
            DomainError::NoHintsAvailable(_) => (StatusCode::BAD_REQUEST, "no_hints_available"),
            DomainError::InvalidHintKind(_) => (StatusCode::BAD_REQUEST, "invalid_hint_kind"),
            DomainError::InsufficientData { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "insufficient_data")
            }
            DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            DomainError::SessionLimitReached(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "session_limit_reached")
            }
            DomainError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
            }
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
