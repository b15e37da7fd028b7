use std::sync::Arc;

use anyhow::Context;
use bytes::Bytes;
use fashionai_common::{Config, ProductType, Session};
use imagegen_client::ImageGenClient;
use mockup_client::MockupClient;
use storefront_client::{NewProduct, Product, StorefrontClient, StorefrontError};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::backoff::RetryPolicy;
use crate::catalog::ProductCatalog;
use crate::error::StudioError;
use crate::pipeline::{GenerationRequest, PipelineOutput, ProductPipeline};
use crate::traits::{ImageGenerator, ProductPublisher};

/// How many candidates one prompt produces in the studio.
pub const IMAGES_PER_PROMPT: usize = 2;

/// Generate artwork, turn it into a product image, publish the product.
pub struct Studio {
    pipeline: ProductPipeline,
    generator: Option<Arc<dyn ImageGenerator>>,
    publisher: Arc<dyn ProductPublisher>,
}

impl Studio {
    pub fn new(
        pipeline: ProductPipeline,
        generator: Option<Arc<dyn ImageGenerator>>,
        publisher: Arc<dyn ProductPublisher>,
    ) -> Self {
        Self {
            pipeline,
            generator,
            publisher,
        }
    }

    /// Wire the production clients from configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let catalog = match &config.product_catalog_path {
            Some(path) => Arc::new(
                ProductCatalog::from_json_file(path)
                    .with_context(|| format!("loading product catalog {}", path.display()))?,
            ),
            None => ProductCatalog::builtin(),
        };

        let storefront = Arc::new(
            StorefrontClient::new(&config.storefront_api_url, config.http_timeout)
                .context("building storefront client")?,
        );
        let mockup_api_key = config
            .mockup_api_key
            .as_deref()
            .ok_or(StudioError::NotConfigured("MOCKUP_API_KEY"))?;
        let mockups = Arc::new(
            MockupClient::new(mockup_api_key, config.http_timeout)
                .context("building mockup client")?
                .with_base_url(&config.mockup_api_url),
        );
        let generator = match &config.imagegen_worker_url {
            Some(url) => Some(Arc::new(
                ImageGenClient::new(url, config.http_timeout).context("building image worker client")?,
            ) as Arc<dyn ImageGenerator>),
            None => None,
        };

        let pipeline = ProductPipeline::new(catalog, storefront.clone(), mockups).with_retry_policy(
            RetryPolicy::new(config.compose_max_attempts, config.compose_backoff_base),
        );

        Ok(Self::new(pipeline, generator, storefront))
    }

    pub fn pipeline(&self) -> &ProductPipeline {
        &self.pipeline
    }

    /// Generate `count` candidate images, one worker call each, in order. The
    /// first failure aborts the batch.
    pub async fn generate_images(
        &self,
        prompt: &str,
        style: &str,
        count: usize,
    ) -> Result<Vec<Bytes>, StudioError> {
        if prompt.trim().is_empty() || style.trim().is_empty() {
            return Err(StudioError::MissingPromptOrStyle);
        }
        let generator = self
            .generator
            .as_ref()
            .ok_or(StudioError::NotConfigured("IMAGEGEN_WORKER_URL"))?;

        let mut images = Vec::with_capacity(count);
        for i in 0..count {
            info!(image = i + 1, of = count, style, "Requesting generated image");
            let image = generator
                .generate(prompt, style)
                .await
                .map_err(StudioError::ImageGeneration)?;
            images.push(image);
        }
        Ok(images)
    }

    pub async fn create_product(
        &self,
        product_type: ProductType,
        request: &GenerationRequest,
        user: &str,
        cancel: &CancellationToken,
    ) -> Result<PipelineOutput, StudioError> {
        Ok(self
            .pipeline
            .generate_product_image(product_type, request, user, cancel)
            .await?)
    }

    /// Record a finished product in the marketplace. Requires a pipeline
    /// output, so nothing is published unless composition succeeded.
    pub async fn publish(
        &self,
        session: &Session,
        product_type: ProductType,
        prompt: &str,
        output: &PipelineOutput,
    ) -> Result<Product, StudioError> {
        let product_image_url = output
            .product_image_urls
            .first()
            .ok_or(StudioError::NothingToPublish)?;

        let product = NewProduct {
            prompt: prompt.to_string(),
            product_type: product_type.label().to_string(),
            generated_image_url: output.source_image_url.clone(),
            product_image_url: product_image_url.clone(),
        };

        match self.publisher.publish(session.token(), &product).await {
            Ok(created) => Ok(created),
            Err(StorefrontError::SessionExpired { .. }) => Err(StudioError::SessionExpired),
            Err(e) => Err(StudioError::Publish(e)),
        }
    }

    /// Compose and publish in one go.
    pub async fn create_and_publish(
        &self,
        session: &Session,
        product_type: ProductType,
        request: &GenerationRequest,
        user: &str,
        cancel: &CancellationToken,
    ) -> Result<Product, StudioError> {
        let output = self.create_product(product_type, request, user, cancel).await?;
        self.publish(session, product_type, &request.prompt, &output)
            .await
    }
}
