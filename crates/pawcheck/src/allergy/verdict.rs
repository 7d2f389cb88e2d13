use super::matcher::Hit;
use serde::{Deserialize, Serialize};

/// Overall screening outcome for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Safe,
    Avoid,
    Unknown,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Safe => "SAFE",
            Verdict::Avoid => "AVOID",
            Verdict::Unknown => "UNKNOWN",
        }
    }
}

/// Ingredient text we can screen: present, non-blank, ASCII apart from whitespace.
pub fn is_screenable(ingredients: Option<&str>) -> bool {
    match ingredients {
        Some(text) if !text.trim().is_empty() => looks_english(text),
        _ => false,
    }
}

pub fn looks_english(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|ch| ch.is_ascii() || ch.is_whitespace())
}

/// Missing or unreadable text is `Unknown` regardless of hits.
pub fn assess(ingredients: Option<&str>, hits: &[Hit]) -> Verdict {
    if !is_screenable(ingredients) {
        Verdict::Unknown
    } else if hits.is_empty() {
        Verdict::Safe
    } else {
        Verdict::Avoid
    }
}
