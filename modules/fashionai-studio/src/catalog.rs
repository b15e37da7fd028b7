// Product-type → mockup template table.
//
// Built once and validated at load: every entry is either Ready (both ids
// present and well-formed) or Unimplemented. Lookups never re-validate.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use fashionai_common::ProductType;
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::error::{CatalogError, PipelineError};

/// A raw catalog row as written in a catalog file. Ids are optional strings so
/// a product can be listed before its template exists.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateEntry {
    pub product_type: ProductType,
    #[serde(default)]
    pub mockup_id: Option<String>,
    #[serde(default)]
    pub smart_object_id: Option<String>,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub previews: Vec<String>,
}

/// A template the compositing service can render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockupTemplate {
    pub mockup_id: Uuid,
    pub smart_object_id: Uuid,
    pub placeholder: String,
    pub previews: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateStatus {
    Ready(MockupTemplate),
    Unimplemented { placeholder: String },
}

#[derive(Debug, Clone)]
pub struct ProductCatalog {
    entries: HashMap<ProductType, TemplateStatus>,
}

static BUILTIN: LazyLock<Arc<ProductCatalog>> = LazyLock::new(|| {
    Arc::new(ProductCatalog::load(builtin_entries()).expect("built-in catalog is valid"))
});

impl ProductCatalog {
    /// Validate entries into a catalog. Incomplete entries are kept as
    /// `Unimplemented` and reported once here; malformed ids and duplicates
    /// fail the load.
    pub fn load(entries: impl IntoIterator<Item = TemplateEntry>) -> Result<Self, CatalogError> {
        let mut map = HashMap::new();

        for entry in entries {
            let product_type = entry.product_type;
            let status = validate(entry)?;
            if let TemplateStatus::Unimplemented { .. } = status {
                warn!(%product_type, "Catalog entry has no complete mockup template");
            }
            if map.insert(product_type, status).is_some() {
                return Err(CatalogError::Duplicate(product_type));
            }
        }

        Ok(Self { entries: map })
    }

    /// The table shipped with the storefront, shared process-wide.
    pub fn builtin() -> Arc<ProductCatalog> {
        BUILTIN.clone()
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<TemplateEntry> =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::load(entries)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&json)
    }

    /// The renderable template for a product type.
    pub fn template(&self, product_type: ProductType) -> Result<&MockupTemplate, PipelineError> {
        match self.entries.get(&product_type) {
            Some(TemplateStatus::Ready(template)) => Ok(template),
            _ => Err(PipelineError::UnimplementedProductType(product_type)),
        }
    }

    pub fn status(&self, product_type: ProductType) -> Option<&TemplateStatus> {
        self.entries.get(&product_type)
    }

    pub fn is_ready(&self, product_type: ProductType) -> bool {
        matches!(self.status(product_type), Some(TemplateStatus::Ready(_)))
    }

    /// Product types that can be rendered, in display order.
    pub fn ready_types(&self) -> Vec<ProductType> {
        ProductType::ALL
            .into_iter()
            .filter(|p| self.is_ready(*p))
            .collect()
    }
}

fn validate(entry: TemplateEntry) -> Result<TemplateStatus, CatalogError> {
    let product_type = entry.product_type;
    let mockup_id = parse_id(product_type, "mockup_id", entry.mockup_id)?;
    let smart_object_id = parse_id(product_type, "smart_object_id", entry.smart_object_id)?;

    Ok(match (mockup_id, smart_object_id) {
        (Some(mockup_id), Some(smart_object_id)) => TemplateStatus::Ready(MockupTemplate {
            mockup_id,
            smart_object_id,
            placeholder: entry.placeholder,
            previews: entry.previews,
        }),
        _ => TemplateStatus::Unimplemented {
            placeholder: entry.placeholder,
        },
    })
}

fn parse_id(
    product_type: ProductType,
    field: &'static str,
    raw: Option<String>,
) -> Result<Option<Uuid>, CatalogError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => Uuid::parse_str(value)
            .map(Some)
            .map_err(|_| CatalogError::InvalidId {
                product_type,
                field,
                value: value.to_string(),
            }),
    }
}

fn builtin_entries() -> Vec<TemplateEntry> {
    const TABLE: [(ProductType, &str, &str, &str); 7] = [
        (
            ProductType::TShirt,
            "46886c5d-24df-404d-ab7f-478c95ff2708",
            "bb813c7e-702a-4420-814c-1baa123fd3f8",
            "T-Shirt",
        ),
        (
            ProductType::Hoodie,
            "eecd6941-9e79-4b5f-a8f0-84293660a351",
            "d576fa03-c818-450b-80e4-f054eadfba14",
            "Hoodie",
        ),
        (
            ProductType::WallArt,
            "cdfa29b5-ea24-4b9b-ad2f-fcfd714f0e74",
            "cba0affc-6efd-43b1-9b5a-bdebd0aa7bb5",
            "Wall+Art",
        ),
        (
            ProductType::Mug,
            "30ab35b2-9cd5-42ea-ba69-203edba05ecd",
            "52293076-0ac7-4814-8890-763d21a60ee4",
            "Mug",
        ),
        (
            ProductType::Sweatshirt,
            "b1051cf9-fcc0-4608-ae56-39fd653b7624",
            "d6bf7c2c-6e78-424f-8e7a-7225599c4e78",
            "Sweatshirt",
        ),
        (
            ProductType::Pillow,
            "00001ebe-0ff5-431e-bc36-ad9162af9f2e",
            "ee4e3666-7ead-488f-a6d2-07015d741104",
            "Pillow",
        ),
        (
            ProductType::ToteBag,
            "1fa458ea-658c-4cf0-8c5b-44cff9641734",
            "9fe1699b-06ba-4da7-a59c-d7ff375c93e4",
            "Tote+Bag",
        ),
    ];

    TABLE
        .into_iter()
        .map(|(product_type, mockup_id, smart_object_id, label)| {
            // Wall art has a single face; everything else has front and back.
            let previews = if product_type == ProductType::WallArt {
                vec![format!("https://placehold.co/300x300?text={label}")]
            } else {
                vec![
                    format!("https://placehold.co/300x300?text={label}+Front"),
                    format!("https://placehold.co/300x300?text={label}+Back"),
                ]
            };
            TemplateEntry {
                product_type,
                mockup_id: Some(mockup_id.to_string()),
                smart_object_id: Some(smart_object_id.to_string()),
                placeholder: format!("https://placehold.co/300x300?text={label}+Preview"),
                previews,
            }
        })
        .collect()
}
