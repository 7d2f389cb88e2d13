//! Product screening: lookup, allergen check, and profile maintenance
//! behind one service, plus the HTTP routes that expose it.

pub mod router;
pub mod service;

pub use router::scan_router;
pub use service::{AllergenCheck, ScanError, ScanReport, ScanService};
