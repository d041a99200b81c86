//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and error message.
///
/// # Error Categories
///
/// - **Validation Errors**: malformed or missing request fields
/// - **Authentication Errors**: missing, invalid, expired or revoked credentials
/// - **Conflict Errors**: uniqueness violations (e.g. email already registered)
/// - **Internal Errors**: hashing, signing or storage failures
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Credential missing, malformed, expired, revoked, or not matching.
    ///
    /// Carries no detail on purpose: every authentication failure looks the
    /// same to the caller.
    #[error("Unauthorized")]
    Unauthorized,

    /// A unique constraint was violated.
    #[error("{0}")]
    Conflict(String),

    /// Request body or parameters are invalid.
    #[error("{0}")]
    InvalidRequest(String),

    /// Failure not attributable to the caller (hashing, signing, task join).
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `InvalidRequest` → 400 Bad Request
/// - `Unauthorized` → 401 Unauthorized
/// - `Conflict` → 409 Conflict
/// - `Internal`, `Database` → 500 Internal Server Error (details logged, hidden from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::InvalidRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            AppError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "unauthorized", self.to_string())
            }
            AppError::Conflict(ref msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            AppError::Internal(_) | AppError::Database(_) => {
                tracing::error!(error = %self, "request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
