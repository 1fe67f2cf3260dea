//! Remote product gateway contract

use crate::ClientResult;
use async_trait::async_trait;
use shared::models::{
    ImageId, ImageOwner, ImageRecord, ImageSortOrder, ProductId, ProductPayload, ProductRecord,
    SourceFile, VariantId, VariantPayload, VariantRecord,
};

/// One file upload into a gallery
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file: SourceFile,
    pub alt_text: Option<String>,
    pub sort_order: i32,
}

/// Single-entity product endpoints
///
/// Every call is independent and non-transactional. Implementations attach
/// the session token returned by [`ProductGateway::token`] to each request.
#[async_trait]
pub trait ProductGateway: Send + Sync {
    /// Current session token, if any
    fn token(&self) -> Option<&str>;

    async fn create_product(&self, payload: &ProductPayload) -> ClientResult<ProductRecord>;

    async fn update_product(&self, id: ProductId, payload: &ProductPayload) -> ClientResult<()>;

    /// Full aggregate including galleries and variants
    async fn fetch_product(&self, id: ProductId) -> ClientResult<ProductRecord>;

    async fn create_variant(
        &self,
        product_id: ProductId,
        payload: &VariantPayload,
    ) -> ClientResult<VariantRecord>;

    async fn update_variant(
        &self,
        product_id: ProductId,
        variant_id: VariantId,
        payload: &VariantPayload,
    ) -> ClientResult<()>;

    async fn upload_image(
        &self,
        owner: ImageOwner,
        upload: &ImageUpload,
    ) -> ClientResult<ImageRecord>;

    async fn delete_image(&self, owner: ImageOwner, image_id: ImageId) -> ClientResult<()>;

    async fn update_image_alt_text(
        &self,
        owner: ImageOwner,
        image_id: ImageId,
        alt_text: &str,
    ) -> ClientResult<()>;

    /// Moves a single image. Variant galleries have no bulk reorder.
    async fn update_image_sort_order(
        &self,
        owner: ImageOwner,
        image_id: ImageId,
        sort_order: i32,
    ) -> ClientResult<()>;

    async fn reorder_images(
        &self,
        owner: ImageOwner,
        order: &[ImageSortOrder],
    ) -> ClientResult<()>;
}
