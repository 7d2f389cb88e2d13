use super::normalize::{normalize, tokenize};
use super::synonyms::expand_allergen;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Shortest single-token candidate allowed to match as a bare substring.
pub const DEFAULT_MIN_SUBSTRING_LEN: usize = 5;

/// How a candidate was located in the ingredient text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Phrase,
    Token,
}

impl MatchKind {
    pub fn label(&self) -> &'static str {
        match self {
            MatchKind::Phrase => "phrase",
            MatchKind::Token => "token",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            MatchKind::Phrase => 0,
            MatchKind::Token => 1,
        }
    }
}

/// A user allergen found in ingredient text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit {
    /// The allergen as the user entered it.
    pub allergen: String,
    /// Normalized form that was found.
    pub matched: String,
    pub kind: MatchKind,
}

struct IngredientIndex<'a> {
    text: &'a str,
    tokens: HashSet<&'a str>,
}

impl<'a> IngredientIndex<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            tokens: tokenize(text).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum MatchRule {
    Phrase,
    Token,
    Substring,
}

const MATCH_RULES: [MatchRule; 3] = [MatchRule::Phrase, MatchRule::Token, MatchRule::Substring];

impl MatchRule {
    fn kind(&self) -> MatchKind {
        match self {
            MatchRule::Phrase | MatchRule::Substring => MatchKind::Phrase,
            MatchRule::Token => MatchKind::Token,
        }
    }

    fn matches(
        &self,
        index: &IngredientIndex<'_>,
        candidate: &str,
        min_substring_len: usize,
    ) -> bool {
        let multi_word = candidate.contains(' ');
        match self {
            MatchRule::Phrase => multi_word && index.text.contains(candidate),
            MatchRule::Token => !multi_word && index.tokens.contains(candidate),
            MatchRule::Substring => {
                !multi_word
                    && candidate.len() >= min_substring_len
                    && index.text.contains(candidate)
            }
        }
    }
}

/// Matches ingredient text against a list of user allergens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllergenMatcher {
    min_substring_len: usize,
}

impl Default for AllergenMatcher {
    fn default() -> Self {
        Self {
            min_substring_len: DEFAULT_MIN_SUBSTRING_LEN,
        }
    }
}

impl AllergenMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_substring_len(min_substring_len: usize) -> Self {
        Self { min_substring_len }
    }

    pub fn min_substring_len(&self) -> usize {
        self.min_substring_len
    }

    /// Hits for every allergen (and its synonyms) present in `ingredients`.
    ///
    /// Phrase hits sort ahead of token hits; within a kind, longer matches
    /// come first. Each (allergen, matched) pair is reported once.
    pub fn find_hits<S: AsRef<str>>(&self, ingredients: &str, allergens: &[S]) -> Vec<Hit> {
        let text = normalize(ingredients);
        if text.is_empty() || allergens.is_empty() {
            return Vec::new();
        }

        let index = IngredientIndex::new(&text);
        let mut seen: HashSet<(String, String)> = HashSet::new();
        let mut hits = Vec::new();

        for raw in allergens {
            let raw = raw.as_ref();
            let candidates = expand_allergen(raw);
            let Some(term) = candidates.first().cloned() else {
                continue;
            };

            for candidate in candidates {
                let Some(rule) = MATCH_RULES
                    .iter()
                    .find(|rule| rule.matches(&index, &candidate, self.min_substring_len))
                else {
                    continue;
                };

                if seen.insert((term.clone(), candidate.clone())) {
                    hits.push(Hit {
                        allergen: raw.to_string(),
                        matched: candidate,
                        kind: rule.kind(),
                    });
                }
            }
        }

        hits.sort_by(|left, right| {
            left.kind
                .rank()
                .cmp(&right.kind.rank())
                .then_with(|| right.matched.len().cmp(&left.matched.len()))
        });
        hits
    }
}

/// [`AllergenMatcher::find_hits`] with the default substring threshold.
pub fn find_allergen_hits<S: AsRef<str>>(ingredients: &str, allergens: &[S]) -> Vec<Hit> {
    AllergenMatcher::default().find_hits(ingredients, allergens)
}

/// Distinct matched strings, longest first, for presentation highlighting.
pub fn highlight_terms(hits: &[Hit]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut terms: Vec<String> = hits
        .iter()
        .filter(|hit| seen.insert(hit.matched.as_str()))
        .map(|hit| hit.matched.clone())
        .collect();
    terms.sort_by(|left, right| right.len().cmp(&left.len()));
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(allergen: &str, matched: &str, kind: MatchKind) -> Hit {
        Hit {
            allergen: allergen.to_string(),
            matched: matched.to_string(),
            kind,
        }
    }

    #[test]
    fn phrase_hits_precede_token_hits() {
        let hits = find_allergen_hits(
            "Chicken, Brown Rice, Pea Protein, Salt",
            &["chicken", "pea protein"],
        );
        assert_eq!(
            hits,
            vec![
                hit("pea protein", "pea protein", MatchKind::Phrase),
                hit("chicken", "chicken", MatchKind::Token),
            ]
        );
    }

    #[test]
    fn synonym_expansion_finds_dairy_as_milk() {
        let hits = find_allergen_hits("Milk, Wheat Flour", &["dairy"]);
        assert_eq!(hits, vec![hit("dairy", "milk", MatchKind::Token)]);
    }

    #[test]
    fn empty_ingredients_yield_no_hits() {
        assert!(find_allergen_hits("", &["beef"]).is_empty());
        assert!(find_allergen_hits(" ,;() ", &["beef"]).is_empty());
    }

    #[test]
    fn empty_allergen_list_yields_no_hits() {
        let none: [&str; 0] = [];
        assert!(find_allergen_hits("Beef, Rice", &none).is_empty());
    }

    #[test]
    fn blank_allergen_terms_are_skipped() {
        let hits = find_allergen_hits("Beef, Rice", &["", "  ", "beef"]);
        assert_eq!(hits, vec![hit("beef", "beef", MatchKind::Token)]);
    }

    #[test]
    fn short_candidates_need_an_exact_token() {
        assert!(find_allergen_hits("Peanut Butter, Oats", &["pea"]).is_empty());
        let hits = find_allergen_hits("Peas, Pea, Carrots", &["pea"]);
        assert!(hits.contains(&hit("pea", "pea", MatchKind::Token)));
        assert!(hits.contains(&hit("pea", "peas", MatchKind::Token)));
    }

    #[test]
    fn long_candidates_fall_back_to_substring_as_phrase() {
        let hits = find_allergen_hits("Dehydrated Chickenmeal, Rice", &["chicken"]);
        assert_eq!(hits, vec![hit("chicken", "chicken", MatchKind::Phrase)]);
    }

    #[test]
    fn substring_threshold_is_tunable() {
        let strict = AllergenMatcher::with_min_substring_len(10);
        assert!(strict
            .find_hits("Dehydrated Chickenmeal", &["chicken"])
            .is_empty());

        let loose = AllergenMatcher::with_min_substring_len(3);
        assert_eq!(
            loose.find_hits("Peanut Butter", &["pea"]),
            vec![hit("pea", "pea", MatchKind::Phrase)]
        );
    }

    #[test]
    fn multi_word_terms_match_only_as_contiguous_phrases() {
        assert!(find_allergen_hits("Pea Fiber, Whey Protein", &["pea protein"]).is_empty());
        assert_eq!(
            find_allergen_hits("Dried Pea Protein", &["Pea Protein"]),
            vec![hit("Pea Protein", "pea protein", MatchKind::Phrase)]
        );
    }

    #[test]
    fn duplicate_terms_report_each_pair_once() {
        let hits = find_allergen_hits("Beef, Beef Liver", &["beef", "Beef", " BEEF "]);
        assert_eq!(
            hits,
            vec![
                hit("beef", "beef liver", MatchKind::Phrase),
                hit("beef", "beef", MatchKind::Token),
            ]
        );
    }

    #[test]
    fn hits_sort_by_kind_then_length() {
        let hits = find_allergen_hits(
            "Salmon, Chicken Meal, Egg, Corn Gluten Meal, Whey",
            &["egg", "corn", "chicken", "dairy", "fish"],
        );
        for pair in hits.windows(2) {
            let (left, right) = (&pair[0], &pair[1]);
            assert!(left.kind.rank() <= right.kind.rank(), "{left:?} before {right:?}");
            if left.kind == right.kind {
                assert!(left.matched.len() >= right.matched.len());
            }
        }
        assert_eq!(hits[0].matched, "corn gluten meal");
    }

    #[test]
    fn hits_never_repeat_a_pair() {
        let hits = find_allergen_hits(
            "Wheat Flour, Wheat Gluten, Wheat, Gluten",
            &["wheat", "gluten", "grain", "wheat"],
        );
        let mut pairs = HashSet::new();
        for hit in &hits {
            assert!(pairs.insert((normalize(&hit.allergen), hit.matched.clone())));
        }
    }

    #[test]
    fn highlight_terms_are_distinct_and_longest_first() {
        let hits = vec![
            hit("grain", "wheat", MatchKind::Token),
            hit("gluten", "wheat gluten", MatchKind::Phrase),
            hit("wheat", "wheat", MatchKind::Token),
            hit("wheat", "wheat gluten", MatchKind::Phrase),
            hit("corn", "corn", MatchKind::Token),
        ];
        assert_eq!(highlight_terms(&hits), vec!["wheat gluten", "wheat", "corn"]);
        assert!(highlight_terms(&[]).is_empty());
    }

    #[test]
    fn match_kind_serializes_lowercase() {
        let json = serde_json::to_value(hit("beef", "beef", MatchKind::Token)).expect("serialize");
        assert_eq!(json["kind"], "token");
        assert_eq!(MatchKind::Phrase.label(), "phrase");
    }
}
