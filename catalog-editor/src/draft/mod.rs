//! Draft state
//!
//! The in-memory product aggregate edited before submit: base fields, an
//! ordered product gallery and variants with their own galleries. Nothing
//! in here performs I/O; files are held until the sync run uploads them.

mod identity;
mod image;
mod product;
mod validation;
mod variant;

pub use identity::{ImageIdentity, Identity, LocalKey, VariantIdentity};
pub use image::ImageDraft;
pub use product::{Gallery, PendingDeletion, ProductBase, ProductDraft};
pub use validation::{validate_required_text, validate_text_len};
pub use variant::{VariantDraft, VariantField};
