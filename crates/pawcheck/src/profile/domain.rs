use crate::allergy::normalize;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

pub const DEFAULT_DOG_NAME: &str = "My Dog";

/// The single user profile: whose food is being screened and what to avoid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredProfile {
    pub dog_name: String,
    pub allergens: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for StoredProfile {
    fn default() -> Self {
        Self {
            dog_name: DEFAULT_DOG_NAME.to_string(),
            allergens: Vec::new(),
            updated_at: None,
        }
    }
}

impl StoredProfile {
    /// Lenient decoding of a persisted document.
    ///
    /// Fields with the wrong shape fall back to their defaults instead of
    /// rejecting the whole profile.
    pub fn from_json_value(value: &Value) -> Self {
        let dog_name = value
            .get("dogName")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_DOG_NAME)
            .to_string();

        let allergens = value
            .get("allergens")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(Value::as_str)
                    .filter(|entry| !entry.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let updated_at = value
            .get("updatedAt")
            .and_then(Value::as_str)
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|stamp| stamp.with_timezone(&Utc));

        Self {
            dog_name,
            allergens,
            updated_at,
        }
    }

    /// Appends a trimmed allergen unless an equivalent one is already listed.
    /// Returns whether the list changed.
    pub fn add_allergen(&mut self, raw: &str) -> bool {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return false;
        }

        let before = self.allergens.len();
        self.allergens.push(trimmed.to_string());
        self.allergens = dedupe_allergens(&self.allergens);
        self.allergens.len() != before
    }

    /// Removes entries spelled exactly like `raw`.
    pub fn remove_allergen(&mut self, raw: &str) -> bool {
        let before = self.allergens.len();
        self.allergens.retain(|allergen| allergen != raw);
        self.allergens.len() != before
    }

    pub fn rename(&mut self, dog_name: &str) {
        self.dog_name = dog_name.to_string();
    }
}

/// Keeps the first spelling of each allergen by normalized form.
///
/// Entries that normalize to nothing are dropped; survivors are trimmed.
pub fn dedupe_allergens<S: AsRef<str>>(allergens: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    allergens
        .iter()
        .map(AsRef::as_ref)
        .filter(|raw| {
            let normalized = normalize(raw);
            !normalized.is_empty() && seen.insert(normalized)
        })
        .map(|raw| raw.trim().to_string())
        .collect()
}
