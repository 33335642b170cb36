/// Text shaping: paragraph joining, sentence selection and deck naming
use crate::config::{DECK_NAME_MAX_CHARS, DEFAULT_DECK, MIN_SENTENCE_CHARS};
use regex::Regex;
use std::sync::LazyLock;

static SENTENCE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[.!?]+").expect("sentence break pattern is valid")
});

/// Join paragraph texts into one body of text
///
/// Each paragraph is trimmed, empty ones are dropped, and the rest are
/// joined with a single space.
pub fn join_paragraphs<I, S>(paragraphs: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    paragraphs
        .into_iter()
        .filter_map(|p| {
            let trimmed = p.as_ref().trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pick up to `limit` sentences long enough to make a card from
///
/// Algorithm:
/// 1. Split on runs of `.`, `!` and `?`
/// 2. Trim each piece
/// 3. Drop pieces shorter than MIN_SENTENCE_CHARS characters
/// 4. Keep the first `limit`, in original order
pub fn candidate_sentences(text: &str, limit: usize) -> Vec<String> {
    SENTENCE_BREAK
        .split(text)
        .map(str::trim)
        .filter(|s| s.chars().count() >= MIN_SENTENCE_CHARS)
        .take(limit)
        .map(str::to_string)
        .collect()
}

/// Deck name for an export: the page title cut to DECK_NAME_MAX_CHARS
pub fn deck_name(title: Option<&str>) -> String {
    match title {
        Some(t) if !t.is_empty() => t.chars().take(DECK_NAME_MAX_CHARS).collect(),
        _ => DEFAULT_DECK.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG_A: &str = "Rust guarantees memory safety without a garbage collector";
    const LONG_B: &str = "Ownership rules are checked entirely at compile time";

    #[test]
    fn test_join_paragraphs() {
        let joined = join_paragraphs(["  First para. ", "", "   ", "Second para."]);
        assert_eq!(joined, "First para. Second para.");
    }

    #[test]
    fn test_join_paragraphs_empty() {
        assert_eq!(join_paragraphs(Vec::<String>::new()), "");
        assert_eq!(join_paragraphs(["  ", "\n"]), "");
    }

    #[test]
    fn test_candidate_sentences_filters_short() {
        let text = format!("Too short. {}! Tiny? {}.", LONG_A, LONG_B);

        let sentences = candidate_sentences(&text, 10);

        assert_eq!(sentences, vec![LONG_A.to_string(), LONG_B.to_string()]);
    }

    #[test]
    fn test_candidate_sentences_respects_limit_and_order() {
        let text = (1..=5)
            .map(|i| format!("Sentence number {} is long enough to keep around", i))
            .collect::<Vec<_>>()
            .join(". ");

        let sentences = candidate_sentences(&text, 3);

        assert_eq!(sentences.len(), 3);
        assert!(sentences[0].starts_with("Sentence number 1"));
        assert!(sentences[2].starts_with("Sentence number 3"));
    }

    #[test]
    fn test_candidate_sentences_terminator_runs() {
        let text = format!("{}?!... {}", LONG_A, LONG_B);
        assert_eq!(candidate_sentences(&text, 5).len(), 2);
    }

    #[test]
    fn test_candidate_sentences_boundary() {
        let exactly_30 = "a".repeat(30);
        let just_under = "b".repeat(29);
        let text = format!("{}. {}.", exactly_30, just_under);

        assert_eq!(candidate_sentences(&text, 5), vec![exactly_30]);
    }

    #[test]
    fn test_candidate_sentences_counts_chars_not_bytes() {
        // 20 two-byte characters: 40 bytes but only 20 chars
        let text = "é".repeat(20);
        assert!(candidate_sentences(&text, 5).is_empty());
    }

    #[test]
    fn test_candidate_sentences_zero_limit() {
        assert!(candidate_sentences(LONG_A, 0).is_empty());
    }

    #[test]
    fn test_deck_name() {
        assert_eq!(deck_name(Some("Short title")), "Short title");
        assert_eq!(deck_name(Some("")), DEFAULT_DECK);
        assert_eq!(deck_name(None), DEFAULT_DECK);

        let long = "x".repeat(80);
        assert_eq!(deck_name(Some(&long)).chars().count(), DECK_NAME_MAX_CHARS);
    }
}
