//! Allergen screening for ingredient lists.
//!
//! Everything here is pure: ingredient text and allergen terms go in,
//! hits, highlight terms, and a verdict come out. The synonym table is the
//! only shared state and is built once on first use.

pub mod highlight;
pub mod matcher;
pub mod normalize;
pub mod synonyms;
pub mod verdict;

pub use highlight::{highlight_segments, render_marked, HighlightSegment};
pub use matcher::{
    find_allergen_hits, highlight_terms, AllergenMatcher, Hit, MatchKind,
    DEFAULT_MIN_SUBSTRING_LEN,
};
pub use normalize::{normalize, tokenize};
pub use synonyms::expand_allergen;
pub use verdict::{assess, is_screenable, looks_english, Verdict};
