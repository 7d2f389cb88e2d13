use super::barcode::clean_barcode;
use super::domain::{Product, ProductSource};
use super::providers::{FoodFactsProvider, GoUpcProvider, ProductProvider};
use super::LookupError;
use crate::config::LookupConfig;
use tracing::{debug, warn};

/// Ordered chain of product catalogues.
///
/// The first record carrying ingredient text wins; failing that, the first
/// record found at all.
pub struct ProductLookup {
    providers: Vec<Box<dyn ProductProvider>>,
}

impl std::fmt::Debug for ProductLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductLookup")
            .field("sources", &self.sources())
            .finish()
    }
}

impl ProductLookup {
    pub fn new(providers: Vec<Box<dyn ProductProvider>>) -> Self {
        Self { providers }
    }

    /// Go-UPC (when a key is configured), then Open Pet Food Facts, then Open Food Facts.
    pub fn from_config(config: &LookupConfig) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("pawcheck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| LookupError::Client(err.to_string()))?;

        let mut providers: Vec<Box<dyn ProductProvider>> = Vec::new();
        if let Some(api_key) = config.go_upc_api_key.as_deref() {
            providers.push(Box::new(GoUpcProvider::new(
                client.clone(),
                &config.go_upc_url,
                api_key,
            )));
        }
        providers.push(Box::new(FoodFactsProvider::open_pet_food_facts(
            client.clone(),
            &config.open_pet_food_facts_url,
        )));
        providers.push(Box::new(FoodFactsProvider::open_food_facts(
            client,
            &config.open_food_facts_url,
        )));

        Ok(Self::new(providers))
    }

    pub fn sources(&self) -> Vec<ProductSource> {
        self.providers.iter().map(|provider| provider.source()).collect()
    }

    pub async fn lookup(&self, raw_barcode: &str) -> Result<Product, LookupError> {
        let barcode = clean_barcode(raw_barcode)?;
        let mut fallback: Option<Product> = None;
        let mut failures = 0usize;

        for provider in &self.providers {
            let source = provider.source();
            debug!(source = source.label(), %barcode, "querying product source");

            match provider.fetch(&barcode).await {
                Ok(Some(product)) if product.has_ingredients() => return Ok(product),
                Ok(Some(product)) => {
                    debug!(source = source.label(), %barcode, "record has no ingredient text");
                    fallback.get_or_insert(product);
                }
                Ok(None) => {}
                Err(err) => {
                    warn!(source = source.label(), %barcode, error = %err, "product source failed");
                    failures += 1;
                }
            }
        }

        if let Some(product) = fallback {
            return Ok(product);
        }

        if !self.providers.is_empty() && failures == self.providers.len() {
            Err(LookupError::Upstream { barcode })
        } else {
            Err(LookupError::NotFound { barcode })
        }
    }
}
