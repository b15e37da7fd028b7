//! Studio workflow for the FashionAI storefront: turn generated artwork into a
//! finished product image and publish it to the marketplace.
//!
//! The core is [`ProductPipeline`]: upload the artwork once, then composite it
//! onto the product's mockup template with bounded, cancellable retries.
//! [`Studio`] wraps it with image generation and publishing.

pub mod adapters;
pub mod backoff;
pub mod catalog;
pub mod error;
pub mod pipeline;
pub mod studio;
pub mod traits;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use backoff::RetryPolicy;
pub use catalog::{MockupTemplate, ProductCatalog, TemplateEntry, TemplateStatus};
pub use error::{CatalogError, PipelineError, StudioError};
pub use pipeline::{CompositionJob, GenerationRequest, PipelineOutput, PipelineResult, ProductPipeline};
pub use studio::Studio;
pub use tokio_util::sync::CancellationToken;
