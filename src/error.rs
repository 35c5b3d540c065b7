// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Errors raised while reading or writing forum content.
#[derive(Debug, thiserror::Error)]
pub enum ForumError {
    /// The requested record does not exist (or is no longer visible).
    #[error("{0}")]
    NotFound(String),

    /// The caller does not own the record it tried to change.
    #[error("{0}")]
    Forbidden(String),

    /// An assembled projection or aggregate broke a shape or count invariant.
    #[error("{entity}: {message}")]
    Validation {
        entity: &'static str,
        message: String,
    },

    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),

    /// The caller's deadline elapsed before the aggregate was complete.
    #[error("thread detail request timed out")]
    Timeout,
}

impl ForumError {
    pub fn validation(entity: &'static str, message: impl Into<String>) -> Self {
        ForumError::Validation {
            entity,
            message: message.into(),
        }
    }
}

pub type ForumResult<T> = Result<T, ForumError>;

/// Runs the `validator` rules of `value`, tagging failures with the entity name.
pub fn ensure_valid<T: validator::Validate>(entity: &'static str, value: &T) -> ForumResult<()> {
    value
        .validate()
        .map_err(|e| ForumError::validation(entity, e.to_string()))
}

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 504 Gateway Timeout
    Timeout(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Timeout(msg) => {
                tracing::warn!("Request timed out: {}", msg);
                (StatusCode::GATEWAY_TIMEOUT, msg)
            }
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Maps domain failures onto HTTP semantics.
/// Validation failures at this layer are data-integrity defects, so they surface as 500.
impl From<ForumError> for AppError {
    fn from(err: ForumError) -> Self {
        let message = err.to_string();
        match err {
            ForumError::NotFound(_) => AppError::NotFound(message),
            ForumError::Forbidden(_) => AppError::Forbidden(message),
            ForumError::Timeout => AppError::Timeout(message),
            ForumError::Validation { .. } | ForumError::Store(_) => {
                AppError::InternalServerError(message)
            }
        }
    }
}
