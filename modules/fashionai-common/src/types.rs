use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FashionAiError;

// =============================================================================
// Product types
// =============================================================================

/// Every product the studio can put artwork on. The serialized form is the
/// label shown to shoppers and stored on product records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProductType {
    #[serde(rename = "T-Shirt")]
    TShirt,
    #[serde(rename = "Hoodie")]
    Hoodie,
    #[serde(rename = "Wall Art")]
    WallArt,
    #[serde(rename = "Mug")]
    Mug,
    #[serde(rename = "Sweatshirt")]
    Sweatshirt,
    #[serde(rename = "Pillow")]
    Pillow,
    #[serde(rename = "Tote Bag")]
    ToteBag,
}

impl ProductType {
    pub const ALL: [ProductType; 7] = [
        ProductType::TShirt,
        ProductType::Hoodie,
        ProductType::WallArt,
        ProductType::Mug,
        ProductType::Sweatshirt,
        ProductType::Pillow,
        ProductType::ToteBag,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProductType::TShirt => "T-Shirt",
            ProductType::Hoodie => "Hoodie",
            ProductType::WallArt => "Wall Art",
            ProductType::Mug => "Mug",
            ProductType::Sweatshirt => "Sweatshirt",
            ProductType::Pillow => "Pillow",
            ProductType::ToteBag => "Tote Bag",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProductType {
    type Err = FashionAiError;

    /// Accepts the display label in any case, with spaces, dashes or
    /// underscores interchangeable ("wall-art", "Tote_Bag", "tshirt").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        ProductType::ALL
            .into_iter()
            .find(|p| normalize(p.label()) == wanted)
            .ok_or_else(|| FashionAiError::UnknownProductType(s.to_string()))
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

// =============================================================================
// Styles
// =============================================================================

/// Styles offered in the studio. The worker accepts any string; these are the
/// curated choices.
pub const STYLES: [&str; 8] = [
    "Realistic",
    "Cartoon",
    "Anime",
    "Abstract",
    "Watercolor",
    "Oil Painting",
    "Digital Art",
    "Sketch",
];

// =============================================================================
// Session
// =============================================================================

/// An opaque bearer token issued by the storefront backend.
#[derive(Clone)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("token", &"<redacted>").finish()
    }
}
