use async_trait::async_trait;
use bytes::Bytes;
use imagegen_client::ImageGenClient;
use mockup_client::MockupClient;
use storefront_client::{NewProduct, Product, StorefrontClient};

use crate::pipeline::CompositionJob;
use crate::traits::{Compositor, ImageGenerator, ImageUploader, ProductPublisher};

#[async_trait]
impl ImageUploader for StorefrontClient {
    async fn upload(&self, image: Bytes, file_name: &str) -> storefront_client::Result<String> {
        self.upload_image(image, file_name).await
    }
}

#[async_trait]
impl ProductPublisher for StorefrontClient {
    async fn publish(&self, token: &str, product: &NewProduct) -> storefront_client::Result<Product> {
        self.create_product(token, product).await
    }
}

#[async_trait]
impl Compositor for MockupClient {
    async fn compose(&self, job: &CompositionJob) -> mockup_client::Result<Vec<String>> {
        let path = self.render(&job.to_render_request()).await?;
        Ok(vec![path])
    }
}

#[async_trait]
impl ImageGenerator for ImageGenClient {
    async fn generate(&self, prompt: &str, style: &str) -> imagegen_client::Result<Bytes> {
        ImageGenClient::generate(self, prompt, style).await
    }
}
