pub mod error;

pub use error::{ImageGenError, Result};

use std::time::Duration;

use bytes::Bytes;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest<'a> {
    pub prompt: &'a str,
    pub style: &'a str,
}

impl GenerateRequest<'_> {
    pub fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(ImageGenError::InvalidRequest("prompt is empty".into()));
        }
        if self.style.trim().is_empty() {
            return Err(ImageGenError::InvalidRequest("style is empty".into()));
        }
        Ok(())
    }
}

pub struct ImageGenClient {
    client: reqwest::Client,
    worker_url: String,
}

impl ImageGenClient {
    pub fn new(worker_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            worker_url: worker_url.to_string(),
        })
    }

    /// Generate one image from a prompt and style. Returns the raw image bytes
    /// as produced by the worker.
    pub async fn generate(&self, prompt: &str, style: &str) -> Result<Bytes> {
        let body = GenerateRequest { prompt, style };
        body.validate()?;

        let resp = self
            .client
            .post(&self.worker_url)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ImageGenError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = resp.bytes().await?;
        if bytes.is_empty() {
            return Err(ImageGenError::EmptyImage);
        }

        tracing::debug!(bytes = bytes.len(), style, "Generated image");
        Ok(bytes)
    }
}
