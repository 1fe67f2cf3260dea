//! Image Model

use super::ids::{ImageId, ProductId, VariantId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Image record as returned by the backend
///
/// Product images carry `product_id`, variant images carry `variant_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    pub id: ImageId,
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default)]
    pub variant_id: Option<VariantId>,
    pub image_url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

/// One entry of a reorder request body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSortOrder {
    pub id: ImageId,
    pub sort_order: i32,
}

impl ImageSortOrder {
    /// Build a reorder payload from ids already in gallery order
    pub fn from_ordered(ids: impl IntoIterator<Item = ImageId>) -> Vec<Self> {
        ids.into_iter()
            .enumerate()
            .map(|(i, id)| Self {
                id,
                sort_order: i as i32,
            })
            .collect()
    }
}

/// The gallery an image belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageOwner {
    Product(ProductId),
    Variant {
        product_id: ProductId,
        variant_id: VariantId,
    },
}

impl ImageOwner {
    pub fn product_id(&self) -> ProductId {
        match self {
            ImageOwner::Product(id) => *id,
            ImageOwner::Variant { product_id, .. } => *product_id,
        }
    }

    pub fn variant_id(&self) -> Option<VariantId> {
        match self {
            ImageOwner::Product(_) => None,
            ImageOwner::Variant { variant_id, .. } => Some(*variant_id),
        }
    }

    /// Collection path relative to the API root
    pub fn images_path(&self) -> String {
        match self {
            ImageOwner::Product(id) => format!("api/products/{}/images", id),
            ImageOwner::Variant {
                product_id,
                variant_id,
            } => format!("api/products/{}/variants/{}/images", product_id, variant_id),
        }
    }
}

impl fmt::Display for ImageOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageOwner::Product(id) => write!(f, "product {}", id),
            ImageOwner::Variant { variant_id, .. } => write!(f, "variant {}", variant_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_payload_is_dense() {
        let a = ImageId::new_v4();
        let b = ImageId::new_v4();
        let payload = ImageSortOrder::from_ordered([b, a]);
        assert_eq!(payload.len(), 2);
        assert_eq!(payload[0].id, b);
        assert_eq!(payload[0].sort_order, 0);
        assert_eq!(payload[1].id, a);
        assert_eq!(payload[1].sort_order, 1);

        let json = serde_json::to_value(&payload[0]).unwrap();
        assert!(json.get("sortOrder").is_some());
    }

    #[test]
    fn test_owner_paths() {
        let pid = ProductId::new_v4();
        let vid = VariantId::new_v4();
        assert_eq!(
            ImageOwner::Product(pid).images_path(),
            format!("api/products/{}/images", pid)
        );
        let owner = ImageOwner::Variant {
            product_id: pid,
            variant_id: vid,
        };
        assert_eq!(
            owner.images_path(),
            format!("api/products/{}/variants/{}/images", pid, vid)
        );
        assert_eq!(owner.product_id(), pid);
        assert_eq!(owner.variant_id(), Some(vid));
    }

    #[test]
    fn test_image_record_from_backend_json() {
        let json = r#"{
            "id": "0b0e7d3e-7a57-4f0f-8d2a-9a6a5b1c2d3e",
            "productId": "5c3a1c2e-8f0b-4c55-9a55-2f1f1f0b7a10",
            "imageUrl": "https://cdn.example.com/a.png",
            "altText": null,
            "sortOrder": 2
        }"#;
        let record: ImageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.sort_order, 2);
        assert!(record.variant_id.is_none());
        assert!(record.alt_text.is_none());
    }
}
