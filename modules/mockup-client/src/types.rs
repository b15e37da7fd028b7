use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- Render request ---

/// Body for `POST /renders`: one mockup template, artwork per smart object.
#[derive(Debug, Clone, Serialize)]
pub struct RenderRequest {
    pub mockup_uuid: Uuid,
    pub smart_objects: Vec<SmartObject>,
    pub metadata: RenderMetadata,
}

/// A named placeholder region of the template and the artwork that fills it.
#[derive(Debug, Clone, Serialize)]
pub struct SmartObject {
    pub uuid: Uuid,
    pub asset: Asset,
}

#[derive(Debug, Clone, Serialize)]
pub struct Asset {
    pub url: String,
}

/// Free-form metadata echoed back by the service. Field names follow what the
/// storefront already sends.
#[derive(Debug, Clone, Serialize)]
pub struct RenderMetadata {
    pub user: String,
    pub prompt: String,
    pub style: String,
    #[serde(rename = "productType")]
    pub product_type: String,
}

impl RenderRequest {
    /// Single smart-object render, the only shape the storefront uses.
    pub fn single(
        mockup_uuid: Uuid,
        smart_object_uuid: Uuid,
        asset_url: impl Into<String>,
        metadata: RenderMetadata,
    ) -> Self {
        Self {
            mockup_uuid,
            smart_objects: vec![SmartObject {
                uuid: smart_object_uuid,
                asset: Asset {
                    url: asset_url.into(),
                },
            }],
            metadata,
        }
    }
}

// --- Render response ---

/// Envelope returned by the render endpoint. Every field is optional because a
/// 2xx body is not guaranteed to carry the result.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderResponse {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<RenderData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderData {
    pub export_path: Option<String>,
}
