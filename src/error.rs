//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::DomainError;
use crate::seed::SeedError;
use crate::store::StoreError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Server errors (5xx)
    #[error("Failed to initialize database")]
    Seed(#[from] SeedError),

    #[error("Error retrieving transaction data")]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, error) = match &self {
            // 400 Bad Request
            AppError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request", None),

            AppError::Domain(domain_err) => match domain_err {
                DomainError::MissingParameter(_) => {
                    (StatusCode::BAD_REQUEST, "missing_parameter", None)
                }
                DomainError::UnknownMonth(_) => (StatusCode::BAD_REQUEST, "unknown_month", None),
                DomainError::InvalidPagination { .. } => {
                    (StatusCode::BAD_REQUEST, "invalid_pagination", None)
                }
            },

            // 500 Internal Server Error
            AppError::Seed(e) => {
                tracing::error!("Error initializing database: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "seed_failed",
                    Some(e.to_string()),
                )
            }
            AppError::Store(e) => {
                tracing::error!("Store error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "store_error", None)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
            AppError::Config(e) => {
                tracing::error!("Config error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "config_error", None)
            }
        };

        let message = if status.is_server_error() && !matches!(self, AppError::Seed(_)) {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            message,
            error_code: error_code.to_string(),
            error,
        };

        (status, Json(body)).into_response()
    }
}
