// Test mocks for the studio.
//
// One mock per trait seam, each scripted up front and recording its calls:
// - MockUploader (ImageUploader) — fixed URL, fixed error, or never answers
// - MockCompositor (Compositor) — queue of outcomes (or hangs), records jobs + call instants
// - MockGenerator (ImageGenerator) — queue of outcomes
// - MockPublisher (ProductPublisher) — records products, fixed outcome
//
// Call instants use tokio's clock, so paused-time tests can assert backoff gaps.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use fashionai_common::ProductType;
use imagegen_client::ImageGenError;
use mockup_client::MockupError;
use storefront_client::{NewProduct, Product, StorefrontError};
use tokio::time::Instant;

use crate::catalog::{ProductCatalog, TemplateEntry};
use crate::pipeline::{CompositionJob, GenerationRequest, ProductPipeline};
use crate::traits::{Compositor, ImageGenerator, ImageUploader, ProductPublisher};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub const MUG_MOCKUP: &str = "30ab35b2-9cd5-42ea-ba69-203edba05ecd";
pub const MUG_SLOT: &str = "52293076-0ac7-4814-8890-763d21a60ee4";

pub fn mug_request() -> GenerationRequest {
    GenerationRequest {
        prompt: "a red fox in the snow".to_string(),
        style: "Watercolor".to_string(),
        source_image: Bytes::from_static(b"\x89PNG fake image"),
    }
}

/// Catalog with a ready Mug, a Hoodie missing its smart object, and a Pillow
/// missing its mockup. Everything else is absent.
pub fn partial_catalog() -> Arc<ProductCatalog> {
    let entry = |product_type, mockup: Option<&str>, slot: Option<&str>| TemplateEntry {
        product_type,
        mockup_id: mockup.map(String::from),
        smart_object_id: slot.map(String::from),
        placeholder: String::new(),
        previews: vec![],
    };
    Arc::new(
        ProductCatalog::load(vec![
            entry(ProductType::Mug, Some(MUG_MOCKUP), Some(MUG_SLOT)),
            entry(ProductType::Hoodie, Some(MUG_MOCKUP), None),
            entry(ProductType::Pillow, None, Some(MUG_SLOT)),
        ])
        .unwrap(),
    )
}

pub fn pipeline_with(
    catalog: Arc<ProductCatalog>,
    uploader: Arc<MockUploader>,
    compositor: Arc<MockCompositor>,
) -> ProductPipeline {
    ProductPipeline::new(catalog, uploader, compositor)
}

pub fn server_error() -> MockupError {
    MockupError::Api {
        status: 502,
        message: "Bad Gateway".to_string(),
    }
}

// ---------------------------------------------------------------------------
// MockUploader
// ---------------------------------------------------------------------------

pub struct MockUploader {
    /// `None` never answers.
    outcome: Option<Result<String, StorefrontError>>,
    calls: Mutex<Vec<(usize, String)>>,
}

impl MockUploader {
    pub fn ok(url: &str) -> Self {
        Self {
            outcome: Some(Ok(url.to_string())),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: StorefrontError) -> Self {
        Self {
            outcome: Some(Err(err)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn hanging() -> Self {
        Self {
            outcome: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// (byte length, file name) of each upload.
    pub fn calls(&self) -> Vec<(usize, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageUploader for MockUploader {
    async fn upload(&self, image: Bytes, file_name: &str) -> storefront_client::Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((image.len(), file_name.to_string()));
        match &self.outcome {
            Some(outcome) => outcome.clone(),
            None => std::future::pending().await,
        }
    }
}

// ---------------------------------------------------------------------------
// MockCompositor
// ---------------------------------------------------------------------------

enum Step {
    Reply(mockup_client::Result<Vec<String>>),
    Hang,
}

/// Replays scripted outcomes in order. Once the script runs out every call
/// fails with a 500.
pub struct MockCompositor {
    script: Mutex<VecDeque<Step>>,
    jobs: Mutex<Vec<CompositionJob>>,
    instants: Mutex<Vec<Instant>>,
}

impl MockCompositor {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            jobs: Mutex::new(Vec::new()),
            instants: Mutex::new(Vec::new()),
        }
    }

    pub fn then_ok(self, url: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Step::Reply(Ok(vec![url.to_string()])));
        self
    }

    pub fn then_err(self, err: MockupError) -> Self {
        self.script.lock().unwrap().push_back(Step::Reply(Err(err)));
        self
    }

    /// A 2xx that parsed but carried no images.
    pub fn then_empty(self) -> Self {
        self.script.lock().unwrap().push_back(Step::Reply(Ok(vec![])));
        self
    }

    /// A render that never completes.
    pub fn then_hang(self) -> Self {
        self.script.lock().unwrap().push_back(Step::Hang);
        self
    }

    pub fn call_count(&self) -> usize {
        self.jobs.lock().unwrap().len()
    }

    pub fn jobs(&self) -> Vec<CompositionJob> {
        self.jobs.lock().unwrap().clone()
    }

    /// Time between consecutive calls.
    pub fn gaps(&self) -> Vec<std::time::Duration> {
        let instants = self.instants.lock().unwrap();
        instants.windows(2).map(|w| w[1] - w[0]).collect()
    }
}

impl Default for MockCompositor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Compositor for MockCompositor {
    async fn compose(&self, job: &CompositionJob) -> mockup_client::Result<Vec<String>> {
        self.jobs.lock().unwrap().push(job.clone());
        self.instants.lock().unwrap().push(Instant::now());
        let step = self.script.lock().unwrap().pop_front();
        match step {
            Some(Step::Reply(outcome)) => outcome,
            Some(Step::Hang) => std::future::pending().await,
            None => Err(MockupError::Api {
                status: 500,
                message: "MockCompositor: script exhausted".to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// MockGenerator
// ---------------------------------------------------------------------------

pub struct MockGenerator {
    script: Mutex<VecDeque<imagegen_client::Result<Bytes>>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn then_image(self, bytes: &'static [u8]) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(Bytes::from_static(bytes)));
        self
    }

    pub fn then_err(self, err: ImageGenError) -> Self {
        self.script.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerator for MockGenerator {
    async fn generate(&self, prompt: &str, style: &str) -> imagegen_client::Result<Bytes> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), style.to_string()));
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ImageGenError::EmptyImage))
    }
}

// ---------------------------------------------------------------------------
// MockPublisher
// ---------------------------------------------------------------------------

pub struct MockPublisher {
    failure: Option<StorefrontError>,
    published: Mutex<Vec<(String, NewProduct)>>,
}

impl MockPublisher {
    pub fn ok() -> Self {
        Self {
            failure: None,
            published: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: StorefrontError) -> Self {
        Self {
            failure: Some(err),
            published: Mutex::new(Vec::new()),
        }
    }

    /// (token, product) for every publish call.
    pub fn published(&self) -> Vec<(String, NewProduct)> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProductPublisher for MockPublisher {
    async fn publish(&self, token: &str, product: &NewProduct) -> storefront_client::Result<Product> {
        let mut published = self.published.lock().unwrap();
        published.push((token.to_string(), product.clone()));

        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        Ok(Product {
            id: published.len() as i64,
            user_id: 1,
            prompt: product.prompt.clone(),
            product_type: product.product_type.clone(),
            generated_image_url: product.generated_image_url.clone(),
            product_image_url: product.product_image_url.clone(),
            created_at: chrono::Utc::now(),
        })
    }
}
