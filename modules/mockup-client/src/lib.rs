pub mod error;
pub mod types;

pub use error::{MockupError, Result};
pub use types::{Asset, RenderData, RenderMetadata, RenderRequest, RenderResponse, SmartObject};

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://app.dynamicmockups.com/api/v1";

pub struct MockupClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl MockupClient {
    pub fn new(api_key: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Render artwork onto a mockup template. Returns the export path of the
    /// finished image. A single call, no retries.
    pub async fn render(&self, request: &RenderRequest) -> Result<String> {
        let url = format!("{}/renders", self.base_url);

        tracing::debug!(mockup = %request.mockup_uuid, "Sending render request");

        let resp = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("Accept", "application/json")
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(MockupError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        let parsed: RenderResponse = serde_json::from_str(&body)?;
        export_path(parsed)
    }
}

/// Pull the finished image out of a 2xx render envelope.
pub fn export_path(response: RenderResponse) -> Result<String> {
    if !response.success {
        return Err(MockupError::Rejected(
            response
                .message
                .unwrap_or_else(|| "success flag not set".to_string()),
        ));
    }

    response
        .data
        .and_then(|d| d.export_path)
        .filter(|p| !p.is_empty())
        .ok_or(MockupError::MissingExportPath)
}
