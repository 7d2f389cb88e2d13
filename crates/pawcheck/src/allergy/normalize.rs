/// Canonical comparison form for ingredient and allergen text.
///
/// Lowercases, turns parentheses and every character outside
/// `[a-z0-9 /-]` into a space, then collapses whitespace runs and trims.
/// All equality and substring checks in the matcher run on this form.
pub fn normalize(value: &str) -> String {
    let mapped: String = value
        .to_lowercase()
        .chars()
        .map(|ch| match ch {
            'a'..='z' | '0'..='9' | '/' | '-' => ch,
            _ => ' ',
        })
        .collect();

    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whitespace tokens of already-normalized text.
pub fn tokenize(normalized: &str) -> impl Iterator<Item = &str> + '_ {
    normalized.split_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(
            normalize("Chicken, Brown Rice, Pea Protein, Salt."),
            "chicken brown rice pea protein salt"
        );
    }

    #[test]
    fn parentheses_become_token_boundaries() {
        assert_eq!(
            normalize("Chicken Fat (Preserved With Mixed Tocopherols)"),
            "chicken fat preserved with mixed tocopherols"
        );
    }

    #[test]
    fn keeps_slash_and_hyphen() {
        assert_eq!(normalize("Sun-Dried  Tomato/Basil"), "sun-dried tomato/basil");
    }

    #[test]
    fn apostrophes_split_words() {
        assert_eq!(normalize("Brewer’s Dried Yeast"), "brewer s dried yeast");
        assert_eq!(normalize("brewer's yeast"), "brewer s yeast");
    }

    #[test]
    fn non_ascii_letters_are_dropped() {
        assert_eq!(normalize("Poulet Épicé"), "poulet pic");
        assert_eq!(normalize("鶏肉"), "");
    }

    #[test]
    fn degenerate_inputs_normalize_to_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t\n "), "");
        assert_eq!(normalize("(),.;:!?%"), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        let samples = [
            "",
            "Milk, Wheat Flour",
            "  Salmon Meal (source of Omega-3)  ",
            "Vitamin B12 / D3 Supplement; Zinc-Proteinate",
            "Käse & Weizen",
            "\u{00a0}tabs\tand\nnewlines\u{2003}",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "input: {sample:?}");
        }
    }

    #[test]
    fn tokenize_splits_normalized_text() {
        let tokens: Vec<&str> = tokenize("chicken brown rice").collect();
        assert_eq!(tokens, vec!["chicken", "brown", "rice"]);
        assert_eq!(tokenize("").count(), 0);
    }
}
