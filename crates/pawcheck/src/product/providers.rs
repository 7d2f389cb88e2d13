use super::domain::{non_blank, Product, ProductSource};
use super::LookupError;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// One upstream product catalogue.
#[async_trait]
pub trait ProductProvider: Send + Sync {
    fn source(&self) -> ProductSource;

    /// `Ok(None)` when the catalogue has no record for `barcode`.
    async fn fetch(&self, barcode: &str) -> Result<Option<Product>, LookupError>;
}

#[derive(Debug, Deserialize)]
pub(crate) struct GoUpcResponse {
    #[serde(default)]
    product: Option<GoUpcProduct>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoUpcProduct {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    brand: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    ingredients: Option<GoUpcIngredients>,
}

#[derive(Debug, Deserialize)]
struct GoUpcIngredients {
    #[serde(default)]
    text: Option<String>,
}

impl GoUpcResponse {
    pub(crate) fn into_product(self, barcode: &str) -> Option<Product> {
        let product = self.product?;
        Some(Product {
            barcode: barcode.to_string(),
            name: non_blank(product.name),
            brand: non_blank(product.brand),
            image_url: non_blank(product.image_url),
            ingredients_text: non_blank(
                product
                    .ingredients
                    .and_then(|ingredients| ingredients.text),
            ),
            source: ProductSource::GoUpc,
        })
    }
}

/// Response shape shared by Open Food Facts and Open Pet Food Facts.
#[derive(Debug, Deserialize)]
pub(crate) struct FoodFactsResponse {
    #[serde(default)]
    product: Option<FoodFactsProduct>,
}

#[derive(Debug, Deserialize)]
struct FoodFactsProduct {
    #[serde(default)]
    product_name: Option<String>,
    #[serde(default)]
    brands: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    ingredients_text: Option<String>,
    #[serde(default)]
    ingredients_text_en: Option<String>,
}

impl FoodFactsResponse {
    pub(crate) fn into_product(self, barcode: &str, source: ProductSource) -> Option<Product> {
        let product = self.product?;
        let ingredients_text =
            non_blank(product.ingredients_text).or_else(|| non_blank(product.ingredients_text_en));

        Some(Product {
            barcode: barcode.to_string(),
            name: non_blank(product.product_name),
            brand: non_blank(product.brands),
            image_url: non_blank(product.image_url),
            ingredients_text,
            source,
        })
    }
}

/// Go-UPC commercial barcode API. Requires an API key.
#[derive(Debug, Clone)]
pub struct GoUpcProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GoUpcProvider {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl ProductProvider for GoUpcProvider {
    fn source(&self) -> ProductSource {
        ProductSource::GoUpc
    }

    async fn fetch(&self, barcode: &str) -> Result<Option<Product>, LookupError> {
        let url = format!("{}/code/{}", self.base_url, barcode);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|err| LookupError::transport(self.source(), err))?;

        if !response.status().is_success() {
            debug!(status = %response.status(), %barcode, "go-upc has no record");
            return Ok(None);
        }

        let payload: GoUpcResponse = response
            .json()
            .await
            .map_err(|err| LookupError::transport(self.source(), err))?;
        Ok(payload.into_product(barcode))
    }
}

/// Open Food Facts family of public catalogues (`/api/v0/product/{code}.json`).
#[derive(Debug, Clone)]
pub struct FoodFactsProvider {
    client: reqwest::Client,
    base_url: String,
    source: ProductSource,
}

impl FoodFactsProvider {
    pub fn open_pet_food_facts(client: reqwest::Client, base_url: &str) -> Self {
        Self::new(client, base_url, ProductSource::OpenPetFoodFacts)
    }

    pub fn open_food_facts(client: reqwest::Client, base_url: &str) -> Self {
        Self::new(client, base_url, ProductSource::OpenFoodFacts)
    }

    fn new(client: reqwest::Client, base_url: &str, source: ProductSource) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            source,
        }
    }
}

#[async_trait]
impl ProductProvider for FoodFactsProvider {
    fn source(&self) -> ProductSource {
        self.source
    }

    async fn fetch(&self, barcode: &str) -> Result<Option<Product>, LookupError> {
        let url = format!("{}/api/v0/product/{}.json", self.base_url, barcode);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| LookupError::transport(self.source, err))?;

        if !response.status().is_success() {
            debug!(
                source = self.source.label(),
                status = %response.status(),
                %barcode,
                "no record"
            );
            return Ok(None);
        }

        let payload: FoodFactsResponse = response
            .json()
            .await
            .map_err(|err| LookupError::transport(self.source, err))?;
        Ok(payload.into_product(barcode, self.source))
    }
}
