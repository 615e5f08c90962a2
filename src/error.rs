//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

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
    Domain(#[from] crate::domain::DomainError),

    // Server errors (5xx)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, details) = match &self {
            // 400 Bad Request
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", Some(msg.clone()))
            }

            // Domain errors - map to appropriate HTTP status
            AppError::Domain(ref domain_err) => {
                use crate::domain::DomainError;
                match domain_err {
                    DomainError::InvalidTimestamp(text) => {
                        (StatusCode::BAD_REQUEST, "invalid_timestamp", Some(text.clone()))
                    }
                    DomainError::InvalidTimezone(zone) => {
                        (StatusCode::BAD_REQUEST, "invalid_timezone", Some(zone.clone()))
                    }
                    DomainError::InvalidEvent(msg) => {
                        (StatusCode::BAD_REQUEST, "invalid_event", Some(msg.clone()))
                    }
                    DomainError::InvalidPagination(msg) => {
                        (StatusCode::BAD_REQUEST, "invalid_pagination", Some(msg.clone()))
                    }
                    DomainError::EventNotFound(id) => {
                        (StatusCode::NOT_FOUND, "event_not_found", Some(id.to_string()))
                    }
                    DomainError::CapacityExceeded { .. } => {
                        (StatusCode::CONFLICT, "capacity_exceeded", Some(domain_err.to_string()))
                    }
                    DomainError::DuplicateRegistration { .. } => {
                        (StatusCode::CONFLICT, "duplicate_registration", Some(domain_err.to_string()))
                    }
                    DomainError::Contention { .. } => {
                        (StatusCode::SERVICE_UNAVAILABLE, "contention", Some(domain_err.to_string()))
                    }
                }
            }

            // 500 Internal Server Error
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
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

        let body = ErrorResponse {
            error: self.to_string(),
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
