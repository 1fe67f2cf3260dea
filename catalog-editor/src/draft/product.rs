//! Product draft aggregate and its mutation operations
//!
//! Every operation takes the draft by value and returns the next draft.
//! Operations addressing an identity that is not in the draft return it
//! unchanged.

use super::identity::{ImageIdentity, VariantIdentity};
use super::image::{self, ImageDraft};
use super::variant::{VariantDraft, VariantField};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{ImageId, ProductId, ProductPayload, ProductRecord, SourceFile};
use uuid::Uuid;

/// Scalar product fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductBase {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sku: String,
    /// Base price, sent as `minPrice`
    #[serde(default, with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub brand_id: Option<Uuid>,
    #[serde(default)]
    pub seller_id: Option<Uuid>,
}

fn default_active() -> bool {
    true
}

impl Default for ProductBase {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            sku: String::new(),
            price: Decimal::ZERO,
            is_active: true,
            is_featured: false,
            category_id: None,
            brand_id: None,
            seller_id: None,
        }
    }
}

impl ProductBase {
    fn from_record(record: &ProductRecord) -> Self {
        Self {
            name: record.name.clone(),
            description: record.description.clone(),
            sku: record.sku.clone(),
            price: record.min_price,
            is_active: record.is_active,
            is_featured: record.is_featured,
            category_id: record.category_id,
            brand_id: record.brand_id,
            seller_id: record.seller_id,
        }
    }

    /// Scalar-only payload; galleries and variants go through their own endpoints
    pub fn to_payload(&self) -> ProductPayload {
        ProductPayload {
            name: self.name.clone(),
            description: self.description.clone(),
            sku: self.sku.clone(),
            is_active: self.is_active,
            is_featured: self.is_featured,
            min_price: self.price,
            brand_id: self.brand_id,
            category_id: self.category_id,
            seller_id: self.seller_id,
            images: Vec::new(),
            variants: Vec::new(),
        }
    }
}

/// Which gallery an image lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gallery {
    Product,
    Variant(VariantIdentity),
}

/// A server image removed locally, deleted remotely at submit time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeletion {
    pub gallery: Gallery,
    pub image: ImageId,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductDraft {
    id: Option<ProductId>,
    base: ProductBase,
    images: Vec<ImageDraft>,
    variants: Vec<VariantDraft>,
    pending_deletions: Vec<PendingDeletion>,
}

impl ProductDraft {
    /// Empty draft for the create flow
    pub fn new(base: ProductBase) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    /// Draft mirroring a fetched product. Galleries are sorted by the
    /// server's order and made dense.
    pub fn hydrate(record: &ProductRecord) -> Self {
        Self {
            id: Some(record.id),
            base: ProductBase::from_record(record),
            images: image::from_records(&record.images),
            variants: record.variants.iter().map(VariantDraft::from_record).collect(),
            pending_deletions: Vec::new(),
        }
    }

    pub fn id(&self) -> Option<ProductId> {
        self.id
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn base(&self) -> &ProductBase {
        &self.base
    }

    pub fn images(&self) -> &[ImageDraft] {
        &self.images
    }

    pub fn variants(&self) -> &[VariantDraft] {
        &self.variants
    }

    pub fn variant(&self, identity: VariantIdentity) -> Option<&VariantDraft> {
        self.variants.iter().find(|v| v.identity() == identity)
    }

    pub fn pending_deletions(&self) -> &[PendingDeletion] {
        &self.pending_deletions
    }

    /// Label used in notices for the product itself
    pub fn label(&self) -> String {
        if self.base.name.is_empty() {
            self.id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "new product".to_string())
        } else {
            self.base.name.clone()
        }
    }

    // ========== Base fields ==========

    pub fn update_base(mut self, f: impl FnOnce(&mut ProductBase)) -> Self {
        f(&mut self.base);
        self
    }

    // ========== Product gallery ==========

    pub fn add_images(mut self, files: impl IntoIterator<Item = SourceFile>) -> Self {
        image::append_files(&mut self.images, files);
        self
    }

    pub fn reorder_images(mut self, new_order: &[ImageIdentity]) -> Self {
        image::reorder(&mut self.images, new_order);
        self
    }

    pub fn remove_image(mut self, identity: ImageIdentity) -> Self {
        if let Some(removed) = image::remove(&mut self.images, identity) {
            self.record_deletion(Gallery::Product, &removed);
        }
        self
    }

    pub fn update_image_alt_text(mut self, identity: ImageIdentity, text: impl Into<String>) -> Self {
        image::set_alt_text(&mut self.images, identity, text.into());
        self
    }

    // ========== Variants ==========

    pub fn add_variant(mut self) -> Self {
        let variant = VariantDraft::new_for(&self.base);
        self.variants.push(variant);
        self
    }

    pub fn duplicate_variant(mut self, identity: VariantIdentity) -> Self {
        if let Some(copy) = self.variant(identity).map(VariantDraft::duplicate) {
            self.variants.push(copy);
        }
        self
    }

    /// Drops the variant from the draft. Pending deletions already recorded
    /// for its gallery are dropped with it.
    pub fn remove_variant(mut self, identity: VariantIdentity) -> Self {
        self.variants.retain(|v| v.identity() != identity);
        self.pending_deletions
            .retain(|d| d.gallery != Gallery::Variant(identity));
        self
    }

    pub fn update_variant_field(mut self, identity: VariantIdentity, field: VariantField) -> Self {
        if let Some(v) = self.variant_mut(identity) {
            v.apply(field);
        }
        self
    }

    /// Sets the value of an attribute the variant already has. Names are
    /// added through [`ProductDraft::add_variant_attribute_key`].
    pub fn update_variant_attribute(
        mut self,
        identity: VariantIdentity,
        key: &str,
        value: impl Into<String>,
    ) -> Self {
        if let Some(v) = self.variant_mut(identity) {
            v.set_attribute(key, value.into());
        }
        self
    }

    pub fn add_variant_attribute_key(mut self, identity: VariantIdentity, key: impl Into<String>) -> Self {
        if let Some(v) = self.variant_mut(identity) {
            v.add_attribute_key(key.into());
        }
        self
    }

    pub fn remove_variant_attribute_key(mut self, identity: VariantIdentity, key: &str) -> Self {
        if let Some(v) = self.variant_mut(identity) {
            v.remove_attribute_key(key);
        }
        self
    }

    // ========== Variant galleries ==========

    pub fn add_variant_images(
        mut self,
        identity: VariantIdentity,
        files: impl IntoIterator<Item = SourceFile>,
    ) -> Self {
        if let Some(v) = self.variant_mut(identity) {
            image::append_files(&mut v.images, files);
        }
        self
    }

    pub fn remove_variant_image(mut self, variant: VariantIdentity, image: ImageIdentity) -> Self {
        let removed = self
            .variant_mut(variant)
            .and_then(|v| image::remove(&mut v.images, image));
        if let Some(removed) = removed {
            self.record_deletion(Gallery::Variant(variant), &removed);
        }
        self
    }

    pub fn reorder_variant_images(mut self, variant: VariantIdentity, new_order: &[ImageIdentity]) -> Self {
        if let Some(v) = self.variant_mut(variant) {
            image::reorder(&mut v.images, new_order);
        }
        self
    }

    // ========== Consistency ==========

    /// Dense sort order and file/identity pairing in every gallery
    pub fn check_invariants(&self) -> bool {
        image::is_consistent(&self.images)
            && self.variants.iter().all(|v| image::is_consistent(&v.images))
    }

    fn variant_mut(&mut self, identity: VariantIdentity) -> Option<&mut VariantDraft> {
        self.variants.iter_mut().find(|v| v.identity() == identity)
    }

    fn record_deletion(&mut self, gallery: Gallery, removed: &ImageDraft) {
        if let Some(id) = removed.identity().durable() {
            self.pending_deletions.push(PendingDeletion {
                gallery,
                image: id,
                label: removed.label(),
            });
        }
    }
}
