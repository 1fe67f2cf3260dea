//! Client error types

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Structured error body returned by the backend
    #[error("API error {code}: {message}")]
    Api {
        code: i32,
        message: String,
        details: Option<serde_json::Value>,
    },
}

impl ClientError {
    /// Map onto the unified error code space
    pub fn error_code(&self) -> ErrorCode {
        match self {
            ClientError::Http(e) if e.is_timeout() => ErrorCode::TimeoutError,
            ClientError::Http(_) => ErrorCode::NetworkError,
            ClientError::InvalidResponse(_) | ClientError::Serialization(_) => {
                ErrorCode::InvalidFormat
            }
            ClientError::Unauthorized(_) => ErrorCode::NotAuthenticated,
            ClientError::Forbidden(_) => ErrorCode::PermissionDenied,
            ClientError::NotFound(_) => ErrorCode::NotFound,
            ClientError::Validation(_) => ErrorCode::ValidationFailed,
            ClientError::Internal(_) => ErrorCode::InternalError,
            ClientError::Api { code, .. } => u16::try_from(*code)
                .ok()
                .and_then(|c| ErrorCode::try_from(c).ok())
                .unwrap_or(ErrorCode::Unknown),
        }
    }

    pub fn to_app_error(&self) -> AppError {
        let err = AppError::with_message(self.error_code(), self.to_string());
        match self {
            ClientError::Api {
                details: Some(details),
                ..
            } => err.with_detail("remote", details.clone()),
            _ => err,
        }
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        err.to_app_error()
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
