//! Variant drafts

use super::identity::{Identity, VariantIdentity};
use super::image::{self, ImageDraft};
use super::product::ProductBase;
use rust_decimal::Decimal;
use shared::models::{AttributeValues, ProductId, VariantPayload, VariantRecord};

/// Scalar variant field update
#[derive(Debug, Clone, PartialEq)]
pub enum VariantField {
    Sku(String),
    Price(Decimal),
    Stock(i32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariantDraft {
    identity: VariantIdentity,
    pub attribute_values: AttributeValues,
    pub sku: String,
    pub price: Decimal,
    pub stock: i32,
    pub(crate) images: Vec<ImageDraft>,
}

impl VariantDraft {
    /// New variant defaulted from the product's base fields
    pub(crate) fn new_for(base: &ProductBase) -> Self {
        let prefix = if base.sku.is_empty() { "NEW" } else { base.sku.as_str() };
        Self {
            identity: Identity::fresh(),
            attribute_values: AttributeValues::new(),
            sku: format!("{}-VAR", prefix),
            price: base.price,
            stock: 0,
            images: Vec::new(),
        }
    }

    pub(crate) fn from_record(record: &VariantRecord) -> Self {
        Self {
            identity: Identity::Durable(record.id),
            attribute_values: record.attribute_values.clone(),
            sku: record.sku.clone(),
            price: record.price,
            stock: record.stock,
            images: image::from_records(&record.images),
        }
    }

    /// Copy with a fresh identity. Only local images come along.
    pub(crate) fn duplicate(&self) -> Self {
        Self {
            identity: Identity::fresh(),
            attribute_values: self.attribute_values.clone(),
            sku: format!("{}-COPY", self.sku),
            price: self.price,
            stock: self.stock,
            images: {
                let mut images: Vec<ImageDraft> =
                    self.images.iter().filter_map(ImageDraft::rekeyed).collect();
                image::compact(&mut images);
                images
            },
        }
    }

    pub fn identity(&self) -> VariantIdentity {
        self.identity
    }

    pub fn images(&self) -> &[ImageDraft] {
        &self.images
    }

    /// Human readable name for notices
    pub fn label(&self) -> String {
        if !self.sku.is_empty() {
            return self.sku.clone();
        }
        if self.attribute_values.is_empty() {
            return self.identity.to_string();
        }
        self.attribute_values
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Wire payload; the local identity never leaves the draft
    pub fn to_payload(&self, product_id: ProductId) -> VariantPayload {
        VariantPayload {
            product_id,
            attribute_values: self.attribute_values.clone(),
            sku: self.sku.clone(),
            price: self.price,
            stock: self.stock,
        }
    }

    pub(crate) fn apply(&mut self, field: VariantField) {
        match field {
            VariantField::Sku(sku) => self.sku = sku,
            VariantField::Price(price) => self.price = price,
            VariantField::Stock(stock) => self.stock = stock,
        }
    }

    /// Sets the value of an existing attribute. Unknown names are ignored.
    pub(crate) fn set_attribute(&mut self, key: &str, value: String) {
        if let Some(slot) = self.attribute_values.get_mut(key) {
            *slot = value;
        }
    }

    /// Adds an empty attribute; an existing name is left alone
    pub(crate) fn add_attribute_key(&mut self, key: String) {
        self.attribute_values.entry(key).or_default();
    }

    pub(crate) fn remove_attribute_key(&mut self, key: &str) {
        self.attribute_values.shift_remove(key);
    }
}
