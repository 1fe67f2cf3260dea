//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the HTTP status code the backend answers with for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound | Self::ProductNotFound | Self::VariantNotFound | Self::ImageNotFound => {
                StatusCode::NOT_FOUND
            }

            // 409 Conflict
            Self::AlreadyExists => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::TokenExpired
            | Self::TokenInvalid
            | Self::SessionExpired => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied => StatusCode::FORBIDDEN,

            // 413 Payload Too Large
            Self::FileTooLarge => StatusCode::PAYLOAD_TOO_LARGE,

            // 400 Bad Request
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::InvalidFormat
            | Self::RequiredField
            | Self::ValueOutOfRange
            | Self::ProductInvalidPrice
            | Self::VariantInvalidStock
            | Self::AttributeNameEmpty
            | Self::UnsupportedFileFormat
            | Self::InvalidImageFile
            | Self::NoFileProvided
            | Self::EmptyFile => StatusCode::BAD_REQUEST,

            // 502 / 504
            Self::NetworkError => StatusCode::BAD_GATEWAY,
            Self::TimeoutError => StatusCode::GATEWAY_TIMEOUT,

            // 500 Internal Server Error
            Self::Unknown | Self::FileStorageFailed | Self::InternalError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Best-effort reverse mapping for responses that carry no structured body
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            200..=299 => Self::Success,
            400 | 422 => Self::ValidationFailed,
            401 => Self::NotAuthenticated,
            403 => Self::PermissionDenied,
            404 => Self::NotFound,
            409 => Self::AlreadyExists,
            413 => Self::FileTooLarge,
            415 => Self::UnsupportedFileFormat,
            408 | 504 => Self::TimeoutError,
            502 | 503 => Self::NetworkError,
            _ => Self::InternalError,
        }
    }
}
