//! Storefront Client - HTTP access to the storefront product API
//!
//! [`ProductGateway`] is the narrow, single-entity contract the catalog
//! editor writes through; [`NetworkHttpClient`] implements it over reqwest.

pub mod config;
pub mod error;
pub mod gateway;
pub mod http;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use gateway::{ImageUpload, ProductGateway};
pub use http::NetworkHttpClient;

// Re-export shared wire types for convenience
pub use shared::models::{
    ImageId, ImageOwner, ImageRecord, ImageSortOrder, ProductId, ProductPayload, ProductRecord,
    SourceFile, VariantId, VariantPayload, VariantRecord,
};
