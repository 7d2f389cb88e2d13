use serde::{Deserialize, Serialize};

/// Upstream catalogue a product record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductSource {
    #[serde(rename = "go-upc")]
    GoUpc,
    #[serde(rename = "openpetfoodfacts")]
    OpenPetFoodFacts,
    #[serde(rename = "openfoodfacts")]
    OpenFoodFacts,
    #[serde(rename = "none")]
    None,
}

impl ProductSource {
    pub fn label(&self) -> &'static str {
        match self {
            ProductSource::GoUpc => "go-upc",
            ProductSource::OpenPetFoodFacts => "openpetfoodfacts",
            ProductSource::OpenFoodFacts => "openfoodfacts",
            ProductSource::None => "none",
        }
    }
}

/// Provider-neutral product record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub barcode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients_text: Option<String>,
    pub source: ProductSource,
}

impl Product {
    pub fn has_ingredients(&self) -> bool {
        self.ingredients_text.is_some()
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown product name")
    }

    pub fn display_brand(&self) -> &str {
        self.brand.as_deref().unwrap_or("Unknown brand")
    }
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
