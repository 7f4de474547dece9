//! Error types for the HTTP API.
//!
//! [`ApiError`] unifies all failure modes into a single enum that converts
//! into an Axum response with a `{"error", "status"}` JSON body.

use agribot_db::DbError;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing, invalid, or expired credentials.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The request body failed to parse or validate.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The request was well-formed but cannot be honored.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A persistence operation failed.
    #[error("database error: {0}")]
    Database(#[from] DbError),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            Self::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Database(DbError::DuplicateEmail(_)) => {
                (StatusCode::BAD_REQUEST, "Email already registered".to_owned())
            }
            Self::Database(e) => {
                tracing::error!(error = %e, "database failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database unavailable".to_owned(),
                )
            }
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "internal failure");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        let mut response = (status, axum::Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
