use serde::Serialize;

/// A slice of the original ingredient text, flagged when it matched a term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightSegment {
    pub text: String,
    pub highlighted: bool,
}

impl HighlightSegment {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            highlighted: false,
        }
    }

    fn marked(text: &str) -> Self {
        Self {
            text: text.to_string(),
            highlighted: true,
        }
    }
}

/// Splits `original` around case-insensitive occurrences of each term.
///
/// Terms are applied in order, so pass them longest first; text already
/// claimed by an earlier term is never split again.
pub fn highlight_segments<S: AsRef<str>>(original: &str, terms: &[S]) -> Vec<HighlightSegment> {
    if original.is_empty() {
        return Vec::new();
    }

    let mut segments = vec![HighlightSegment::plain(original)];
    for term in terms {
        let term = term.as_ref().to_ascii_lowercase();
        if term.is_empty() {
            continue;
        }

        segments = segments
            .into_iter()
            .flat_map(|segment| {
                if segment.highlighted {
                    vec![segment]
                } else {
                    split_on_term(&segment.text, &term)
                }
            })
            .collect();
    }

    segments
}

// ASCII lowercasing keeps byte offsets stable, and an ASCII needle can only
// match on char boundaries.
fn split_on_term(text: &str, term: &str) -> Vec<HighlightSegment> {
    let folded = text.to_ascii_lowercase();
    let mut pieces = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = folded[cursor..].find(term) {
        let start = cursor + offset;
        let end = start + term.len();
        if start > cursor {
            pieces.push(HighlightSegment::plain(&text[cursor..start]));
        }
        pieces.push(HighlightSegment::marked(&text[start..end]));
        cursor = end;
    }

    if cursor < text.len() {
        pieces.push(HighlightSegment::plain(&text[cursor..]));
    }
    pieces
}

/// Joins segments back into one string, wrapping highlighted parts.
pub fn render_marked(segments: &[HighlightSegment], open: &str, close: &str) -> String {
    segments.iter().fold(String::new(), |mut out, segment| {
        if segment.highlighted {
            out.push_str(open);
            out.push_str(&segment.text);
            out.push_str(close);
        } else {
            out.push_str(&segment.text);
        }
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_case_insensitive_occurrences() {
        let segments = highlight_segments("Chicken, Rice, CHICKEN fat", &["chicken"]);
        assert_eq!(
            render_marked(&segments, "[", "]"),
            "[Chicken], Rice, [CHICKEN] fat"
        );
    }

    #[test]
    fn longer_terms_claim_text_first() {
        let segments = highlight_segments("Dried Pea Protein, Peas", &["pea protein", "pea"]);
        assert_eq!(
            render_marked(&segments, "<", ">"),
            "Dried <Pea Protein>, <Pea>s"
        );
        assert_eq!(segments.iter().filter(|s| s.highlighted).count(), 2);
    }

    #[test]
    fn preserves_non_ascii_text() {
        let segments = highlight_segments("Hühnchen (chicken), Reis", &["chicken"]);
        assert_eq!(render_marked(&segments, "*", "*"), "Hühnchen (*chicken*), Reis");
    }

    #[test]
    fn no_terms_keeps_text_whole() {
        let none: [&str; 0] = [];
        let segments = highlight_segments("Beef, Rice", &none);
        assert_eq!(segments, vec![HighlightSegment::plain("Beef, Rice")]);
        assert!(highlight_segments("", &["beef"]).is_empty());
    }

    #[test]
    fn drops_empty_plain_segments() {
        let segments = highlight_segments("beef", &["beef"]);
        assert_eq!(segments, vec![HighlightSegment::marked("beef")]);
    }
}
