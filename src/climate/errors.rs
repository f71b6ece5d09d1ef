//! # Climate Errors
//!
//! Error types for the climate query module.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Result type for climate operations
pub type ClimateResult<T> = Result<T, ClimateError>;

/// Climate query errors
#[derive(Debug, Error)]
pub enum ClimateError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Path parameter is not a `YYYY-MM-DD` date
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// The measurement table has no rows to anchor the rolling window
    #[error("No measurements available")]
    EmptyDataset,

    /// A date read back from the store could not be parsed
    #[error("Stored date '{0}' is not a valid YYYY-MM-DD date")]
    MalformedStoredDate(String),

    /// Connection, pool or SQL failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ClimateError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ClimateError::InvalidDate(_) => StatusCode::BAD_REQUEST,

            ClimateError::EmptyDataset => StatusCode::INTERNAL_SERVER_ERROR,
            ClimateError::MalformedStoredDate(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ClimateError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the caller is at fault
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&ClimateError> for ErrorResponse {
    fn from(err: &ClimateError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ClimateError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if self.is_client_error() {
            tracing::warn!(status = status.as_u16(), error = %self, "rejected request");
        } else {
            tracing::error!(status = status.as_u16(), error = %self, "query failed");
        }

        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
