// catalog-editor/tests/common/mod.rs
// 内存版后端: 记录每次调用, 可按条件注入失败

#![allow(dead_code)]

use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::models::{
    AttributeValues, ImageId, ImageOwner, ImageRecord, ImageSortOrder, ProductId, ProductPayload,
    ProductRecord, SourceFile, VariantId, VariantPayload, VariantRecord,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use storefront_client::{ClientError, ClientResult, ImageUpload, ProductGateway};
use tokio::sync::Notify;

pub const TOKEN: &str = "test-token";

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateProduct { name: String },
    UpdateProduct(ProductId),
    FetchProduct(ProductId),
    CreateVariant { sku: String },
    UpdateVariant { id: VariantId, sku: String },
    UploadImage {
        owner: ImageOwner,
        file_name: String,
        alt_text: Option<String>,
        sort_order: i32,
    },
    DeleteImage { owner: ImageOwner, image: ImageId },
    UpdateAltText {
        owner: ImageOwner,
        image: ImageId,
        alt_text: String,
    },
    UpdateSortOrder {
        owner: ImageOwner,
        image: ImageId,
        sort_order: i32,
    },
    ReorderImages {
        owner: ImageOwner,
        order: Vec<ImageSortOrder>,
    },
}

impl Call {
    pub fn is_fetch(&self) -> bool {
        matches!(self, Call::FetchProduct(_))
    }

    pub fn is_variant_call(&self) -> bool {
        matches!(self, Call::CreateVariant { .. } | Call::UpdateVariant { .. })
    }

    pub fn is_image_call(&self) -> bool {
        matches!(
            self,
            Call::UploadImage { .. }
                | Call::DeleteImage { .. }
                | Call::UpdateAltText { .. }
                | Call::UpdateSortOrder { .. }
                | Call::ReorderImages { .. }
        )
    }
}

#[derive(Default)]
struct Failures {
    create_product: bool,
    update_product: bool,
    fetch_product: bool,
    reorder: bool,
    variant_skus: HashSet<String>,
    upload_files: HashSet<String>,
    delete_images: HashSet<ImageId>,
    sort_orders: HashSet<ImageId>,
}

pub struct FakeStorefront {
    token: Option<String>,
    calls: Mutex<Vec<Call>>,
    failures: Mutex<Failures>,
    products: Mutex<HashMap<ProductId, ProductRecord>>,
    hold_base: Mutex<Option<Arc<Notify>>>,
}

fn scripted(what: &str) -> ClientError {
    ClientError::Internal(format!("scripted failure: {}", what))
}

impl FakeStorefront {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::with_token(Some(TOKEN)))
    }

    pub fn with_token(token: Option<&str>) -> Self {
        Self {
            token: token.map(str::to_string),
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(Failures::default()),
            products: Mutex::new(HashMap::new()),
            hold_base: Mutex::new(None),
        }
    }

    // ========== Scripted failures ==========

    pub fn fail_create_product(&self) {
        self.failures.lock().unwrap().create_product = true;
    }

    pub fn fail_update_product(&self) {
        self.failures.lock().unwrap().update_product = true;
    }

    pub fn fail_fetch(&self) {
        self.failures.lock().unwrap().fetch_product = true;
    }

    pub fn fail_reorder(&self) {
        self.failures.lock().unwrap().reorder = true;
    }

    pub fn fail_variant(&self, sku: &str) {
        self.failures.lock().unwrap().variant_skus.insert(sku.to_string());
    }

    pub fn fail_upload(&self, file_name: &str) {
        self.failures
            .lock()
            .unwrap()
            .upload_files
            .insert(file_name.to_string());
    }

    pub fn fail_delete(&self, image: ImageId) {
        self.failures.lock().unwrap().delete_images.insert(image);
    }

    pub fn fail_sort_order(&self, image: ImageId) {
        self.failures.lock().unwrap().sort_orders.insert(image);
    }

    pub fn clear_failures(&self) {
        *self.failures.lock().unwrap() = Failures::default();
    }

    /// Base persist waits until the returned handle is notified
    pub fn hold_base(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.hold_base.lock().unwrap() = Some(notify.clone());
        notify
    }

    // ========== Inspection ==========

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls issued by a sync run (fetches excluded)
    pub fn write_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(|c| !c.is_fetch()).collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn product(&self, id: ProductId) -> Option<ProductRecord> {
        self.products.lock().unwrap().get(&id).cloned()
    }

    /// Store a product as if created earlier, returning it
    pub fn seed(&self, name: &str, image_urls: &[&str], variant_skus: &[&str]) -> ProductRecord {
        let id = ProductId::new_v4();
        let images = image_urls
            .iter()
            .enumerate()
            .map(|(i, url)| ImageRecord {
                id: ImageId::new_v4(),
                product_id: Some(id),
                variant_id: None,
                image_url: url.to_string(),
                alt_text: Some(url.to_string()),
                sort_order: i as i32,
            })
            .collect();
        let variants = variant_skus
            .iter()
            .map(|sku| VariantRecord {
                id: VariantId::new_v4(),
                product_id: id,
                attribute_values: AttributeValues::new(),
                sku: sku.to_string(),
                price: Decimal::new(1000, 2),
                stock: 1,
                images: Vec::new(),
            })
            .collect();
        let record = ProductRecord {
            id,
            name: name.to_string(),
            description: String::new(),
            sku: name.to_uppercase(),
            is_active: true,
            is_featured: false,
            min_price: Decimal::new(1000, 2),
            brand_id: None,
            category_id: None,
            seller_id: None,
            images,
            variants,
        };
        self.products.lock().unwrap().insert(id, record.clone());
        record
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    async fn wait_if_held(&self) {
        let hold = self.hold_base.lock().unwrap().take();
        if let Some(notify) = hold {
            notify.notified().await;
        }
    }

    fn with_gallery<T>(
        &self,
        owner: ImageOwner,
        f: impl FnOnce(&mut Vec<ImageRecord>) -> T,
    ) -> ClientResult<T> {
        let mut products = self.products.lock().unwrap();
        let product = products
            .get_mut(&owner.product_id())
            .ok_or_else(|| ClientError::NotFound("product".into()))?;
        let gallery = match owner.variant_id() {
            None => &mut product.images,
            Some(vid) => {
                &mut product
                    .variants
                    .iter_mut()
                    .find(|v| v.id == vid)
                    .ok_or_else(|| ClientError::NotFound("variant".into()))?
                    .images
            }
        };
        Ok(f(gallery))
    }
}

fn apply_payload(record: &mut ProductRecord, payload: &ProductPayload) {
    record.name = payload.name.clone();
    record.description = payload.description.clone();
    record.sku = payload.sku.clone();
    record.is_active = payload.is_active;
    record.is_featured = payload.is_featured;
    record.min_price = payload.min_price;
    record.brand_id = payload.brand_id;
    record.category_id = payload.category_id;
    record.seller_id = payload.seller_id;
}

pub fn file(name: &str) -> SourceFile {
    SourceFile::new(name, name.as_bytes().to_vec())
}

#[async_trait]
impl ProductGateway for FakeStorefront {
    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    async fn create_product(&self, payload: &ProductPayload) -> ClientResult<ProductRecord> {
        self.record(Call::CreateProduct {
            name: payload.name.clone(),
        });
        self.wait_if_held().await;
        if self.failures.lock().unwrap().create_product {
            return Err(scripted("create product"));
        }
        assert!(payload.images.is_empty() && payload.variants.is_empty());
        let mut record = ProductRecord {
            id: ProductId::new_v4(),
            name: String::new(),
            description: String::new(),
            sku: String::new(),
            is_active: true,
            is_featured: false,
            min_price: Decimal::ZERO,
            brand_id: None,
            category_id: None,
            seller_id: None,
            images: Vec::new(),
            variants: Vec::new(),
        };
        apply_payload(&mut record, payload);
        self.products.lock().unwrap().insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_product(&self, id: ProductId, payload: &ProductPayload) -> ClientResult<()> {
        self.record(Call::UpdateProduct(id));
        self.wait_if_held().await;
        if self.failures.lock().unwrap().update_product {
            return Err(scripted("update product"));
        }
        assert!(payload.images.is_empty() && payload.variants.is_empty());
        let mut products = self.products.lock().unwrap();
        let record = products
            .get_mut(&id)
            .ok_or_else(|| ClientError::NotFound(id.to_string()))?;
        apply_payload(record, payload);
        Ok(())
    }

    async fn fetch_product(&self, id: ProductId) -> ClientResult<ProductRecord> {
        self.record(Call::FetchProduct(id));
        if self.failures.lock().unwrap().fetch_product {
            return Err(scripted("fetch product"));
        }
        self.product(id)
            .ok_or_else(|| ClientError::NotFound(id.to_string()))
    }

    async fn create_variant(
        &self,
        product_id: ProductId,
        payload: &VariantPayload,
    ) -> ClientResult<VariantRecord> {
        self.record(Call::CreateVariant {
            sku: payload.sku.clone(),
        });
        assert_eq!(payload.product_id, product_id);
        if self.failures.lock().unwrap().variant_skus.contains(&payload.sku) {
            return Err(ClientError::Validation(format!("sku {} rejected", payload.sku)));
        }
        let record = VariantRecord {
            id: VariantId::new_v4(),
            product_id,
            attribute_values: payload.attribute_values.clone(),
            sku: payload.sku.clone(),
            price: payload.price,
            stock: payload.stock,
            images: Vec::new(),
        };
        let mut products = self.products.lock().unwrap();
        let product = products
            .get_mut(&product_id)
            .ok_or_else(|| ClientError::NotFound(product_id.to_string()))?;
        product.variants.push(record.clone());
        Ok(record)
    }

    async fn update_variant(
        &self,
        product_id: ProductId,
        variant_id: VariantId,
        payload: &VariantPayload,
    ) -> ClientResult<()> {
        self.record(Call::UpdateVariant {
            id: variant_id,
            sku: payload.sku.clone(),
        });
        if self.failures.lock().unwrap().variant_skus.contains(&payload.sku) {
            return Err(ClientError::Validation(format!("sku {} rejected", payload.sku)));
        }
        let mut products = self.products.lock().unwrap();
        let variant = products
            .get_mut(&product_id)
            .and_then(|p| p.variants.iter_mut().find(|v| v.id == variant_id))
            .ok_or_else(|| ClientError::NotFound(variant_id.to_string()))?;
        variant.attribute_values = payload.attribute_values.clone();
        variant.sku = payload.sku.clone();
        variant.price = payload.price;
        variant.stock = payload.stock;
        Ok(())
    }

    async fn upload_image(
        &self,
        owner: ImageOwner,
        upload: &ImageUpload,
    ) -> ClientResult<ImageRecord> {
        self.record(Call::UploadImage {
            owner,
            file_name: upload.file.file_name.clone(),
            alt_text: upload.alt_text.clone(),
            sort_order: upload.sort_order,
        });
        // let other uploads interleave when run concurrently
        tokio::task::yield_now().await;
        if self
            .failures
            .lock()
            .unwrap()
            .upload_files
            .contains(&upload.file.file_name)
        {
            return Err(ClientError::Api {
                code: 6501,
                message: format!("{} is too large", upload.file.file_name),
                details: None,
            });
        }
        let record = ImageRecord {
            id: ImageId::new_v4(),
            product_id: Some(owner.product_id()),
            variant_id: owner.variant_id(),
            image_url: format!("https://cdn.test/{}", upload.file.file_name),
            alt_text: upload.alt_text.clone(),
            sort_order: upload.sort_order,
        };
        let stored = record.clone();
        self.with_gallery(owner, move |gallery| gallery.push(stored))?;
        Ok(record)
    }

    async fn delete_image(&self, owner: ImageOwner, image_id: ImageId) -> ClientResult<()> {
        self.record(Call::DeleteImage {
            owner,
            image: image_id,
        });
        if self.failures.lock().unwrap().delete_images.contains(&image_id) {
            return Err(scripted("delete image"));
        }
        self.with_gallery(owner, |gallery| gallery.retain(|i| i.id != image_id))
    }

    async fn update_image_alt_text(
        &self,
        owner: ImageOwner,
        image_id: ImageId,
        alt_text: &str,
    ) -> ClientResult<()> {
        self.record(Call::UpdateAltText {
            owner,
            image: image_id,
            alt_text: alt_text.to_string(),
        });
        self.with_gallery(owner, |gallery| {
            if let Some(image) = gallery.iter_mut().find(|i| i.id == image_id) {
                image.alt_text = Some(alt_text.to_string());
            }
        })
    }

    async fn update_image_sort_order(
        &self,
        owner: ImageOwner,
        image_id: ImageId,
        sort_order: i32,
    ) -> ClientResult<()> {
        self.record(Call::UpdateSortOrder {
            owner,
            image: image_id,
            sort_order,
        });
        if self.failures.lock().unwrap().sort_orders.contains(&image_id) {
            return Err(scripted("update sort order"));
        }
        self.with_gallery(owner, |gallery| {
            if let Some(image) = gallery.iter_mut().find(|i| i.id == image_id) {
                image.sort_order = sort_order;
            }
        })
    }

    async fn reorder_images(
        &self,
        owner: ImageOwner,
        order: &[ImageSortOrder],
    ) -> ClientResult<()> {
        self.record(Call::ReorderImages {
            owner,
            order: order.to_vec(),
        });
        if self.failures.lock().unwrap().reorder {
            return Err(scripted("reorder"));
        }
        self.with_gallery(owner, |gallery| {
            for entry in order {
                if let Some(image) = gallery.iter_mut().find(|i| i.id == entry.id) {
                    image.sort_order = entry.sort_order;
                }
            }
        })
    }
}
