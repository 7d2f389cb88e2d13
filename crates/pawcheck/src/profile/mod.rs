//! The dog's profile: a display name and the allergen terms to avoid.

pub mod domain;
pub mod store;

pub use domain::{dedupe_allergens, StoredProfile, DEFAULT_DOG_NAME};
pub use store::{JsonFileProfileStore, ProfileError, ProfileStore};
