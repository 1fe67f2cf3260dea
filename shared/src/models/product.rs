//! Product Model

use super::ids::ProductId;
use super::image::ImageRecord;
use super::variant::{VariantPayload, VariantRecord};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Product aggregate as returned by `GET /api/products/{id}?includes=...`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
    /// Base price; variants default to it
    #[serde(with = "rust_decimal::serde::float")]
    pub min_price: Decimal,
    #[serde(default)]
    pub brand_id: Option<Uuid>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub seller_id: Option<Uuid>,
    #[serde(default)]
    pub images: Vec<ImageRecord>,
    #[serde(default)]
    pub variants: Vec<VariantRecord>,
}

/// Create/update product payload
///
/// Only scalar fields are persisted through this call. `images` and
/// `variants` are always sent empty; galleries and variants have their own
/// endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    pub sku: String,
    pub is_active: bool,
    pub is_featured: bool,
    #[serde(with = "rust_decimal::serde::float")]
    pub min_price: Decimal,
    pub brand_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub seller_id: Option<Uuid>,
    pub images: Vec<ImageRecord>,
    pub variants: Vec<VariantPayload>,
}

fn default_true() -> bool {
    true
}
