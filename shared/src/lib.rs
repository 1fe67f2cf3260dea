//! Shared types for the storefront catalog tooling
//!
//! Wire models exchanged with the storefront backend, the unified error
//! code system and a few small utilities. Used by `storefront-client`
//! (request/response bodies) and `catalog-editor` (hydration, outcomes).

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{ImageId, ImageOwner, ProductId, SourceFile, VariantId};
pub use serde::{Deserialize, Serialize};
