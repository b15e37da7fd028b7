use std::sync::Arc;

use bytes::Bytes;
use fashionai_common::ProductType;
use mockup_client::{MockupError, RenderMetadata, RenderRequest};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use uuid::Uuid;

use crate::backoff::{sleep_or_cancel, RetryPolicy, Wait};
use crate::catalog::ProductCatalog;
use crate::error::PipelineError;
use crate::traits::{Compositor, ImageUploader};

/// What the user confirmed in the studio. Immutable once submitted.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub style: String,
    pub source_image: Bytes,
}

/// One render job, rebuilt from the request and the uploaded image URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionJob {
    pub mockup_id: Uuid,
    pub smart_object_id: Uuid,
    pub uploaded_image_url: String,
    pub user: String,
    pub prompt: String,
    pub style: String,
    pub product_type: ProductType,
}

impl CompositionJob {
    pub fn to_render_request(&self) -> RenderRequest {
        RenderRequest::single(
            self.mockup_id,
            self.smart_object_id,
            self.uploaded_image_url.clone(),
            RenderMetadata {
                user: self.user.clone(),
                prompt: self.prompt.clone(),
                style: self.style.clone(),
                product_type: self.product_type.label().to_string(),
            },
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    /// Public URL of the uploaded source artwork.
    pub source_image_url: String,
    /// Finished product image(s), never empty.
    pub product_image_urls: Vec<String>,
}

pub type PipelineResult = Result<PipelineOutput, PipelineError>;

/// Upload → compose-with-retry. Holds only shared, immutable state, so one
/// pipeline serves any number of concurrent calls.
#[derive(Clone)]
pub struct ProductPipeline {
    catalog: Arc<ProductCatalog>,
    uploader: Arc<dyn ImageUploader>,
    compositor: Arc<dyn Compositor>,
    retry: RetryPolicy,
}

impl ProductPipeline {
    pub fn new(
        catalog: Arc<ProductCatalog>,
        uploader: Arc<dyn ImageUploader>,
        compositor: Arc<dyn Compositor>,
    ) -> Self {
        Self {
            catalog,
            uploader,
            compositor,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    /// Put the request's artwork on a `product_type` mockup.
    ///
    /// Fails fast with `UnimplementedProductType` before any network call. The
    /// upload runs once; composition runs up to `max_attempts` times with
    /// exponential backoff in between. `cancel` is honoured before the upload,
    /// before every attempt and during every backoff; in-flight calls are
    /// dropped when it fires.
    pub async fn generate_product_image(
        &self,
        product_type: ProductType,
        request: &GenerationRequest,
        user: &str,
        cancel: &CancellationToken,
    ) -> PipelineResult {
        let template = self.catalog.template(product_type)?;

        if cancel.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }

        let file_name = format!("{}.png", Uuid::new_v4());
        let uploaded = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(PipelineError::Cancelled),
            r = self.uploader.upload(request.source_image.clone(), &file_name) => r,
        };
        let source_image_url = uploaded.map_err(|e| {
            warn!(%product_type, error = %e, "Source image upload failed");
            PipelineError::UploadFailed(e)
        })?;

        let job = CompositionJob {
            mockup_id: template.mockup_id,
            smart_object_id: template.smart_object_id,
            uploaded_image_url: source_image_url.clone(),
            user: user.to_string(),
            prompt: request.prompt.clone(),
            style: request.style.clone(),
            product_type,
        };

        let product_image_urls = self.compose_with_retry(&job, cancel).await?;

        info!(
            %product_type,
            images = product_image_urls.len(),
            "Product image generated"
        );

        Ok(PipelineOutput {
            source_image_url,
            product_image_urls,
        })
    }

    async fn compose_with_retry(
        &self,
        job: &CompositionJob,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>, PipelineError> {
        let mut attempt = 0;

        loop {
            attempt += 1;

            if cancel.is_cancelled() {
                return Err(PipelineError::Cancelled);
            }

            info!(product_type = %job.product_type, attempt, "Requesting mockup render");

            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(PipelineError::Cancelled),
                r = self.compositor.compose(job) => r,
            };

            let error = match outcome {
                Ok(urls) if !urls.is_empty() => return Ok(urls),
                Ok(_) => MockupError::MissingExportPath,
                Err(e) => e,
            };

            if self.retry.is_last(attempt) {
                warn!(
                    product_type = %job.product_type,
                    attempts = attempt,
                    error = %error,
                    "Mockup render failed, giving up"
                );
                return Err(PipelineError::CompositionExhausted {
                    attempts: attempt,
                    last: error,
                });
            }

            let delay = self.retry.delay_after(attempt);
            warn!(
                product_type = %job.product_type,
                attempt,
                delay_secs = delay.as_secs_f64(),
                error = %error,
                "Mockup render failed, retrying"
            );

            if sleep_or_cancel(delay, cancel).await == Wait::Cancelled {
                info!(product_type = %job.product_type, attempt, "Render retries cancelled");
                return Err(PipelineError::Cancelled);
            }
        }
    }
}
