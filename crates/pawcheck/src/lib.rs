//! Dog food allergen screening.
//!
//! Looks products up by barcode across public and commercial catalogues,
//! matches their ingredient text against a stored allergen profile, and
//! reports a safe/avoid/unknown verdict with highlight terms.

pub mod allergy;
pub mod config;
pub mod error;
pub mod product;
pub mod profile;
pub mod scan;
pub mod telemetry;
