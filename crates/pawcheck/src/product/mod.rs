//! Barcode lookup across third-party product catalogues.

pub mod barcode;
pub mod domain;
pub mod lookup;
pub mod providers;

pub use barcode::clean_barcode;
pub use domain::{Product, ProductSource};
pub use lookup::ProductLookup;
pub use providers::{FoodFactsProvider, GoUpcProvider, ProductProvider};

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Missing barcode")]
    MissingBarcode,
    #[error("no product found for barcode {barcode}")]
    NotFound { barcode: String },
    #[error("{} request failed: {message}", provider.label())]
    Transport {
        provider: ProductSource,
        message: String,
    },
    #[error("all product sources failed for barcode {barcode}")]
    Upstream { barcode: String },
    #[error("unable to build HTTP client: {0}")]
    Client(String),
}

impl LookupError {
    pub(crate) fn transport<E: std::fmt::Display>(provider: ProductSource, err: E) -> Self {
        Self::Transport {
            provider,
            message: err.to_string(),
        }
    }
}
