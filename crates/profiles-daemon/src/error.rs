//! Error types for profiles-daemon

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Machine-readable error codes returned in API error bodies
pub mod codes {
    pub const PROFILE_NOT_FOUND: &str = "ERR-NF-001";
    pub const PROFILE_ALREADY_EXISTS: &str = "ERR-CF-001";
    pub const INVALID_FORMAT: &str = "ERR-BR-001";
    pub const INVALID_PARAMETER: &str = "ERR-BR-002";
    pub const INTERNAL: &str = "ERR-IS-001";
}

/// Daemon-level errors
#[derive(Debug, Error)]
pub enum DaemonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Server startup error
    #[error("Server error: {0}")]
    Server(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Storage-specific errors
///
/// The in-memory backends never fail on their own; the variants exist for
/// alternative backends and for fault injection in tests.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backend refused or failed the operation
    #[error("Backend error: {0}")]
    Backend(String),

    /// Stored data could not be used
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Errors raised at the service boundary
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Invalid input (blank name, empty list, blank parameter key)
    #[error("{message}")]
    BadRequest {
        message: String,
        code: &'static str,
    },

    /// Profile does not exist
    #[error("{0}")]
    NotFound(String),

    /// Profile name already taken
    #[error("{0}")]
    Conflict(String),

    /// Unexpected failure
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            code: codes::INVALID_FORMAT,
        }
    }

    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            code: codes::INVALID_PARAMETER,
        }
    }

    pub fn profile_not_found() -> Self {
        Self::NotFound("Profile not found".to_string())
    }

    pub fn profile_exists() -> Self {
        Self::Conflict("A profile with this name already exists".to_string())
    }

    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest { code, .. } => code,
            ServiceError::NotFound(_) => codes::PROFILE_NOT_FOUND,
            ServiceError::Conflict(_) => codes::PROFILE_ALREADY_EXISTS,
            ServiceError::Internal(_) => codes::INTERNAL,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        ServiceError::Internal(err.to_string())
    }
}

/// API-specific errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Error raised by a service
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Storage error reached the handler directly
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Service(ServiceError::bad_request(rejection.body_text()))
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

/// Error detail within an error response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    pub message: String,
    pub code: String,
    pub status_code: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Service(err) => (err.status(), err.code(), err.to_string()),
            ApiError::Storage(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                codes::INTERNAL,
                err.to_string(),
            ),
        };

        if status.is_server_error() {
            tracing::error!(code, error = %message, "Request failed");
        } else {
            tracing::warn!(code, status = status.as_u16(), error = %message, "Request rejected");
        }

        let body = ErrorResponse {
            success: false,
            error: ErrorDetail {
                message,
                code: code.to_string(),
                status_code: status.as_u16(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type alias for daemon operations
pub type DaemonResult<T> = Result<T, DaemonError>;
