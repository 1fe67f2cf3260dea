// storefront-client/src/http.rs
// HTTP 客户端 - 网络通信

use crate::gateway::{ImageUpload, ProductGateway};
use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use shared::models::{
    ImageId, ImageOwner, ImageRecord, ImageSortOrder, ProductId, ProductPayload, ProductRecord,
    VariantId, VariantPayload, VariantRecord,
};

/// Relations requested when fetching a full product aggregate
const PRODUCT_INCLUDES: &str = "images,variants,variantImages";

/// 服务端返回的错误响应格式
#[derive(serde::Deserialize)]
struct ApiErrorResponse {
    pub code: i32,
    pub message: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

/// 网络 HTTP 客户端
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Set the session token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// 获取基础 URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    async fn send(&self, req: RequestBuilder) -> ClientResult<reqwest::Response> {
        let req = match self.auth_header() {
            Some(auth) => req.header(reqwest::header::AUTHORIZATION, auth),
            None => req,
        };
        let response = req.send().await?;
        Self::check_status(response).await
    }

    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await?;
        // 尝试解析为 API 错误响应
        if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&text) {
            return Err(ClientError::Api {
                code: api_err.code,
                message: api_err.message,
                details: api_err.details,
            });
        }
        tracing::debug!(status = %status, body = %text, "Request rejected");
        match status {
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized(text)),
            StatusCode::FORBIDDEN => Err(ClientError::Forbidden(text)),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(ClientError::Validation(text))
            }
            _ => Err(ClientError::Internal(text)),
        }
    }

    async fn json<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            ClientError::InvalidResponse(format!("{} ({} bytes)", e, bytes.len()))
        })
    }

    fn upload_form(upload: &ImageUpload) -> ClientResult<Form> {
        let file = &upload.file;
        let part = Part::bytes(file.bytes.to_vec())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)?;
        let mut form = Form::new()
            .part("file", part)
            .text("sortOrder", upload.sort_order.to_string());
        if let Some(alt) = &upload.alt_text {
            form = form.text("altText", alt.clone());
        }
        Ok(form)
    }
}

#[async_trait]
impl ProductGateway for NetworkHttpClient {
    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    async fn create_product(&self, payload: &ProductPayload) -> ClientResult<ProductRecord> {
        let req = self.client.post(self.url("api/products")).json(payload);
        let response = self.send(req).await?;
        Self::json(response).await
    }

    async fn update_product(&self, id: ProductId, payload: &ProductPayload) -> ClientResult<()> {
        let req = self
            .client
            .put(self.url(&format!("api/products/{}", id)))
            .json(payload);
        self.send(req).await?;
        Ok(())
    }

    async fn fetch_product(&self, id: ProductId) -> ClientResult<ProductRecord> {
        let req = self
            .client
            .get(self.url(&format!("api/products/{}", id)))
            .query(&[("includes", PRODUCT_INCLUDES)]);
        let response = self.send(req).await?;
        Self::json(response).await
    }

    async fn create_variant(
        &self,
        product_id: ProductId,
        payload: &VariantPayload,
    ) -> ClientResult<VariantRecord> {
        let req = self
            .client
            .post(self.url(&format!("api/products/{}/variants", product_id)))
            .json(payload);
        let response = self.send(req).await?;
        Self::json(response).await
    }

    async fn update_variant(
        &self,
        product_id: ProductId,
        variant_id: VariantId,
        payload: &VariantPayload,
    ) -> ClientResult<()> {
        let req = self
            .client
            .put(self.url(&format!(
                "api/products/{}/variants/{}",
                product_id, variant_id
            )))
            .json(payload);
        self.send(req).await?;
        Ok(())
    }

    async fn upload_image(
        &self,
        owner: ImageOwner,
        upload: &ImageUpload,
    ) -> ClientResult<ImageRecord> {
        let form = Self::upload_form(upload)?;
        let req = self.client.post(self.url(&owner.images_path())).multipart(form);
        let response = self.send(req).await?;
        Self::json(response).await
    }

    async fn delete_image(&self, owner: ImageOwner, image_id: ImageId) -> ClientResult<()> {
        let req = self
            .client
            .delete(self.url(&format!("{}/{}", owner.images_path(), image_id)));
        self.send(req).await?;
        Ok(())
    }

    async fn update_image_alt_text(
        &self,
        owner: ImageOwner,
        image_id: ImageId,
        alt_text: &str,
    ) -> ClientResult<()> {
        let form = Form::new().text("altText", alt_text.to_string());
        let req = self
            .client
            .put(self.url(&format!("{}/{}", owner.images_path(), image_id)))
            .multipart(form);
        self.send(req).await?;
        Ok(())
    }

    async fn update_image_sort_order(
        &self,
        owner: ImageOwner,
        image_id: ImageId,
        sort_order: i32,
    ) -> ClientResult<()> {
        let form = Form::new().text("sortOrder", sort_order.to_string());
        let req = self
            .client
            .put(self.url(&format!("{}/{}", owner.images_path(), image_id)))
            .multipart(form);
        self.send(req).await?;
        Ok(())
    }

    async fn reorder_images(
        &self,
        owner: ImageOwner,
        order: &[ImageSortOrder],
    ) -> ClientResult<()> {
        let req = self
            .client
            .put(self.url(&format!("{}/reorder", owner.images_path())))
            .json(order);
        self.send(req).await?;
        Ok(())
    }
}
