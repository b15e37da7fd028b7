use std::path::PathBuf;

use fashionai_common::ProductType;
use imagegen_client::ImageGenError;
use mockup_client::MockupError;
use storefront_client::StorefrontError;
use thiserror::Error;

/// Terminal outcomes of one `generate_product_image` call.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// No complete mockup template for this product type. Raised before any network call.
    #[error("Product type {0} is not yet implemented")]
    UnimplementedProductType(ProductType),

    #[error("Image upload failed: {0}")]
    UploadFailed(#[source] StorefrontError),

    #[error("Composition failed after {attempts} attempts: {last}")]
    CompositionExhausted {
        attempts: u32,
        #[source]
        last: MockupError,
    },

    #[error("Cancelled")]
    Cancelled,
}

#[derive(Debug, Error)]
pub enum StudioError {
    #[error("Please enter a prompt and select a style")]
    MissingPromptOrStyle,

    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("Image generation failed: {0}")]
    ImageGeneration(#[source] ImageGenError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("No finished product image to publish")]
    NothingToPublish,

    #[error("Your session has expired. Please log in again.")]
    SessionExpired,

    #[error("Failed to publish product: {0}")]
    Publish(#[source] StorefrontError),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("Failed to parse catalog: {0}")]
    Parse(String),

    #[error("Invalid {field} for {product_type}: {value:?}")]
    InvalidId {
        product_type: ProductType,
        field: &'static str,
        value: String,
    },

    #[error("Duplicate catalog entry for {0}")]
    Duplicate(ProductType),
}
