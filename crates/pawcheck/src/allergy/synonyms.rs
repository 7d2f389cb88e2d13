use super::normalize::normalize;
use std::collections::HashMap;
use std::sync::OnceLock;

static SYNONYM_TABLE: OnceLock<HashMap<String, Vec<String>>> = OnceLock::new();

pub(crate) fn synonyms_for(token: &str) -> &'static [String] {
    synonym_table()
        .get(token)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Normalized candidate forms for a single user-entered allergen.
///
/// The normalized term always comes first. Single-token terms are widened
/// with their synonym entries; multi-word terms are kept as exact phrases.
/// A term that normalizes to nothing yields no candidates.
pub fn expand_allergen(raw: &str) -> Vec<String> {
    let term = normalize(raw);
    if term.is_empty() {
        return Vec::new();
    }

    let mut candidates = vec![term];
    if !candidates[0].contains(' ') {
        for synonym in synonyms_for(&candidates[0]) {
            if !candidates.contains(synonym) {
                candidates.push(synonym.clone());
            }
        }
    }

    candidates
}

fn synonym_table() -> &'static HashMap<String, Vec<String>> {
    SYNONYM_TABLE.get_or_init(|| {
        const ALLERGEN_SYNONYMS: &[(&str, &[&str])] = &[
            // Animal proteins
            (
                "chicken",
                &["poultry", "chicken meal", "chicken fat", "chicken broth", "chicken liver"],
            ),
            ("turkey", &["turkey meal", "turkey broth"]),
            ("duck", &["duck meal"]),
            ("beef", &["bovine", "beef meal", "beef fat", "beef broth", "beef liver"]),
            ("lamb", &["lamb meal", "mutton"]),
            ("pork", &["porcine", "pork meal", "bacon", "ham"]),
            (
                "fish",
                &["salmon", "whitefish", "menhaden", "herring", "fish meal", "fish oil"],
            ),
            ("egg", &["eggs", "egg product", "dried egg", "albumen"]),
            // Dairy
            ("dairy", &["milk", "lactose", "whey", "casein", "cheese", "butter", "yogurt"]),
            ("milk", &["lactose", "whey", "casein"]),
            // Grains
            ("wheat", &["wheat flour", "wheat gluten", "semolina", "durum"]),
            ("gluten", &["wheat gluten", "corn gluten", "corn gluten meal"]),
            ("corn", &["maize", "corn meal", "corn gluten meal", "cornstarch"]),
            ("grain", &["wheat", "corn", "barley", "oats", "rye", "sorghum", "millet"]),
            // Legumes and others
            ("soy", &["soya", "soybean", "soybean meal", "soy protein", "soy flour"]),
            ("pea", &["peas", "pea protein", "pea fiber", "pea starch", "pea flour"]),
            ("peanut", &["peanuts", "peanut butter", "groundnut"]),
            ("potato", &["potatoes", "potato starch", "potato protein"]),
            ("yeast", &["brewer's yeast", "brewer's dried yeast", "dried yeast"]),
        ];

        ALLERGEN_SYNONYMS
            .iter()
            .map(|(allergen, synonyms)| {
                let forms = synonyms
                    .iter()
                    .map(|synonym| normalize(synonym))
                    .filter(|synonym| !synonym.is_empty())
                    .collect();
                (normalize(allergen), forms)
            })
            .collect()
    })
}
