//! Data models
//!
//! Wire shapes exchanged with the storefront backend. The backend speaks
//! camelCase JSON, returns bodies un-enveloped and uses UUID primary keys.

pub mod file;
pub mod ids;
pub mod image;
pub mod product;
pub mod variant;

// Re-exports
pub use file::*;
pub use ids::*;
pub use image::*;
pub use product::*;
pub use variant::*;
