//! # API Error Type
//!
//! Unified error type for route handlers.
//!
//! ## Error Flow
//! ```text
//! StoreError (stockbook-db)
//!      │
//!      ▼
//! ApiError (this module)    { code, message } JSON body
//!      │
//!      ▼
//! HTTP response             400 / 404 / 409 / 500
//! ```
//!
//! Storage internals are logged here and replaced with generic messages
//! so they never leak to clients; user-facing error kinds keep their
//! message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use stockbook_db::StoreError;

/// Error body returned to API clients.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling.
    pub code: ErrorCode,

    /// Human-readable message for display.
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404).
    NotFound,

    /// Input validation failed (400).
    ValidationError,

    /// A sale would drive stock negative (400).
    InsufficientStock,

    /// Delete blocked by existing references (409).
    ReferentialConflict,

    /// Storage operation failed (500).
    StorageError,
}

impl ErrorCode {
    fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::InsufficientStock => StatusCode::BAD_REQUEST,
            ErrorCode::ReferentialConflict => StatusCode::CONFLICT,
            ErrorCode::StorageError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: i64) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

/// Converts storage errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(e) => ApiError::new(ErrorCode::ValidationError, e.to_string()),

            StoreError::NotFound { entity, id } => ApiError::not_found(entity, id),

            StoreError::StockConstraint { .. } => ApiError::new(
                ErrorCode::InsufficientStock,
                "insufficient stock for one or more items",
            ),

            StoreError::ReferentialConflict { .. } => ApiError::new(
                ErrorCode::ReferentialConflict,
                "record is referenced by existing transactions",
            ),

            StoreError::ConnectionFailed(e)
            | StoreError::MigrationFailed(e)
            | StoreError::QueryFailed(e)
            | StoreError::Internal(e) => {
                tracing::error!(error = %e, "storage failure");
                ApiError::new(ErrorCode::StorageError, "storage operation failed")
            }

            StoreError::PoolExhausted => {
                tracing::error!("connection pool exhausted");
                ApiError::new(ErrorCode::StorageError, "storage operation failed")
            }
        }
    }
}
