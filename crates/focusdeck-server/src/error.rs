//! Error types and response helpers for the server.

use axum::http::StatusCode;
use axum::response::Json;
use focusdeck_core::{ConfigError, DatabaseError};
use serde::Serialize;
use tracing::error;

/// The primary error type for server startup.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration loading failed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The record store could not be opened.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Socket binding or serving failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// JSON error body, matching the original backend's `{message}` shape.
#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    pub message: String,
}

pub type Rejection = (StatusCode, Json<ErrorMessage>);

/// Result alias for route handlers.
pub type ApiResult<T> = Result<T, Rejection>;

pub fn bad_request(message: impl Into<String>) -> Rejection {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorMessage {
            message: message.into(),
        }),
    )
}

pub fn not_found(message: impl Into<String>) -> Rejection {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorMessage {
            message: message.into(),
        }),
    )
}

/// Store failures are logged in full and answered with a generic body.
pub fn internal(err: DatabaseError) -> Rejection {
    error!(%err, "record store failure");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorMessage {
            message: "internal error".into(),
        }),
    )
}
