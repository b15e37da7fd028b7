// Trait seams between the studio and its remote collaborators.
//
// ImageUploader   — binary-object store behind the storefront backend
// Compositor      — mockup compositing service
// ImageGenerator  — text-to-image worker
// ProductPublisher — storefront product records
//
// Production impls live in `adapters`; mocks in `testing`.

use async_trait::async_trait;
use bytes::Bytes;

use crate::pipeline::CompositionJob;

#[async_trait]
pub trait ImageUploader: Send + Sync {
    /// Store the image and return its public URL.
    async fn upload(&self, image: Bytes, file_name: &str) -> storefront_client::Result<String>;
}

#[async_trait]
pub trait Compositor: Send + Sync {
    /// One render of `job`. Returns the finished image URL(s).
    async fn compose(&self, job: &CompositionJob) -> mockup_client::Result<Vec<String>>;
}

#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, style: &str) -> imagegen_client::Result<Bytes>;
}

#[async_trait]
pub trait ProductPublisher: Send + Sync {
    async fn publish(
        &self,
        token: &str,
        product: &storefront_client::NewProduct,
    ) -> storefront_client::Result<storefront_client::Product>;
}
