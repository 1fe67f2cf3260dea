//! Unified error system
//!
//! - [`ErrorCode`]: Standardized error codes for everything the catalog tooling reports
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with code, message and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 6xxx: Product errors (65xx: file upload)
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::ProductNotFound);
//!
//! let err = AppError::required_field("name")
//!     .with_detail("variant", "SKU-RED");
//! assert_eq!(err.code, ErrorCode::RequiredField);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
