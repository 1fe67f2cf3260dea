//! Variant Model

use super::ids::{ProductId, VariantId};
use super::image::ImageRecord;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ordered attribute name to value mapping (e.g. `color -> red`)
pub type AttributeValues = IndexMap<String, String>;

/// Variant record as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantRecord {
    pub id: VariantId,
    pub product_id: ProductId,
    #[serde(default)]
    pub attribute_values: AttributeValues,
    #[serde(default)]
    pub sku: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub images: Vec<ImageRecord>,
}

/// Create/update variant payload
///
/// Never carries a local identity; the product id is attached once known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantPayload {
    pub product_id: ProductId,
    pub attribute_values: AttributeValues,
    pub sku: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: i32,
}
