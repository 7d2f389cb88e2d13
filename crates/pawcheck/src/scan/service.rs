use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::allergy::{
    assess, highlight_segments, highlight_terms, AllergenMatcher, HighlightSegment, Hit, Verdict,
};
use crate::product::{LookupError, Product, ProductLookup};
use crate::profile::{dedupe_allergens, ProfileError, ProfileStore, StoredProfile};

/// Screening result for one piece of ingredient text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllergenCheck {
    pub verdict: Verdict,
    pub hits: Vec<Hit>,
    pub highlight_terms: Vec<String>,
    pub highlighted: Vec<HighlightSegment>,
}

/// A looked-up product screened against the stored profile.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub product: Product,
    pub dog_name: String,
    pub allergens: Vec<String>,
    pub verdict: Verdict,
    pub hits: Vec<Hit>,
    pub highlight_terms: Vec<String>,
    pub highlighted: Vec<HighlightSegment>,
    pub checked_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error("allergen must not be blank")]
    BlankAllergen,
    #[error("allergen '{0}' is not in the profile")]
    UnknownAllergen(String),
    #[error("profile lock poisoned")]
    ProfileLock,
}

/// Service composing the profile store, product lookup chain, and matcher.
pub struct ScanService<S> {
    profiles: Arc<S>,
    lookup: Arc<ProductLookup>,
    matcher: AllergenMatcher,
    profile_lock: Mutex<()>,
}

impl<S> ScanService<S>
where
    S: ProfileStore + 'static,
{
    pub fn new(profiles: Arc<S>, lookup: Arc<ProductLookup>, matcher: AllergenMatcher) -> Self {
        Self {
            profiles,
            lookup,
            matcher,
            profile_lock: Mutex::new(()),
        }
    }

    /// Screens `ingredients` against `allergens`. Absent text is never matched.
    pub fn check<A: AsRef<str>>(
        &self,
        ingredients: Option<&str>,
        allergens: &[A],
    ) -> AllergenCheck {
        let hits = match ingredients {
            Some(text) => self.matcher.find_hits(text, allergens),
            None => Vec::new(),
        };
        let terms = highlight_terms(&hits);
        let highlighted = ingredients
            .map(|text| highlight_segments(text, &terms))
            .unwrap_or_default();

        AllergenCheck {
            verdict: assess(ingredients, &hits),
            hits,
            highlight_terms: terms,
            highlighted,
        }
    }

    pub async fn lookup(&self, raw_barcode: &str) -> Result<Product, ScanError> {
        Ok(self.lookup.lookup(raw_barcode).await?)
    }

    /// Looks up a product and screens it against the stored profile.
    pub async fn scan(&self, raw_barcode: &str) -> Result<ScanReport, ScanError> {
        let product = self.lookup(raw_barcode).await?;
        let profile = self.profile()?;
        let check = self.check(product.ingredients_text.as_deref(), &profile.allergens);

        info!(
            barcode = %product.barcode,
            source = product.source.label(),
            verdict = check.verdict.label(),
            hits = check.hits.len(),
            "product screened"
        );

        Ok(ScanReport {
            product,
            dog_name: profile.dog_name,
            allergens: profile.allergens,
            verdict: check.verdict,
            hits: check.hits,
            highlight_terms: check.highlight_terms,
            highlighted: check.highlighted,
            checked_at: Utc::now(),
        })
    }

    pub fn profile(&self) -> Result<StoredProfile, ScanError> {
        Ok(self.profiles.load()?)
    }

    /// Replaces the stored profile; allergens are deduplicated on the way in.
    pub fn replace_profile(&self, profile: StoredProfile) -> Result<StoredProfile, ScanError> {
        self.update_profile(|current| {
            current.dog_name = profile.dog_name;
            current.allergens = dedupe_allergens(&profile.allergens);
            Ok(true)
        })
    }

    pub fn add_allergen(&self, raw: &str) -> Result<StoredProfile, ScanError> {
        if raw.trim().is_empty() {
            return Err(ScanError::BlankAllergen);
        }
        self.update_profile(|profile| Ok(profile.add_allergen(raw)))
    }

    pub fn remove_allergen(&self, raw: &str) -> Result<StoredProfile, ScanError> {
        self.update_profile(|profile| {
            if profile.remove_allergen(raw) {
                Ok(true)
            } else {
                Err(ScanError::UnknownAllergen(raw.to_string()))
            }
        })
    }

    pub fn rename_dog(&self, dog_name: &str) -> Result<StoredProfile, ScanError> {
        self.update_profile(|profile| {
            profile.rename(dog_name);
            Ok(true)
        })
    }

    fn update_profile<F>(&self, apply: F) -> Result<StoredProfile, ScanError>
    where
        F: FnOnce(&mut StoredProfile) -> Result<bool, ScanError>,
    {
        let _guard = self
            .profile_lock
            .lock()
            .map_err(|_| ScanError::ProfileLock)?;

        let mut profile = self.profiles.load()?;
        if apply(&mut profile)? {
            profile = self.profiles.save(&profile)?;
        }
        Ok(profile)
    }
}
