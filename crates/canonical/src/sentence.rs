//! Sentence segmentation.
//!
//! Sentences are cut after `.`, `!` or `?` when the next character is
//! whitespace. The terminator stays with its sentence, fragments are trimmed
//! and anything shorter than `min_sentence_chars` is dropped. Inner runs of
//! whitespace, line breaks included, collapse to one space. Surviving
//! sentences are numbered from 1 in document order; that ordinal is the line
//! number reported for sentence matches.

use serde::{Deserialize, Serialize};

use crate::config::CanonicalizeConfig;
use crate::whitespace::collapse_whitespace;

/// A sentence and its 1-based position among the kept sentences of a document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sentence {
    pub text: String,
    pub ordinal: usize,
}

/// Split raw (not normalized) text into sentences.
///
/// ```rust
/// use canonical::{tokenize_sentences, CanonicalizeConfig};
///
/// let cfg = CanonicalizeConfig::default();
/// let sentences = tokenize_sentences("Short. This sentence is long enough! And so is this one?", &cfg);
/// assert_eq!(sentences.len(), 2);
/// assert_eq!(sentences[0].ordinal, 1);
/// assert_eq!(sentences[0].text, "This sentence is long enough!");
/// ```
pub fn tokenize_sentences(text: &str, cfg: &CanonicalizeConfig) -> Vec<Sentence> {
    let mut fragments: Vec<&str> = Vec::new();
    let mut start = 0usize;
    let mut chars = text.char_indices().peekable();

    while let Some((_, ch)) = chars.next() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        if let Some(&(next_idx, next)) = chars.peek() {
            if next.is_whitespace() {
                fragments.push(&text[start..next_idx]);
                start = next_idx;
            }
        }
    }
    fragments.push(&text[start..]);

    fragments
        .into_iter()
        .map(str::trim)
        .filter(|fragment| fragment.chars().count() >= cfg.min_sentence_chars)
        .enumerate()
        .map(|(idx, fragment)| Sentence {
            text: collapse_whitespace(fragment),
            ordinal: idx + 1,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> CanonicalizeConfig {
        CanonicalizeConfig::default()
    }

    #[test]
    fn splits_on_terminators_followed_by_whitespace() {
        let text = "The first sentence is here. The second one asks why? The third shouts loudly!";
        let sentences = tokenize_sentences(text, &cfg());
        let texts: Vec<&str> = sentences.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "The first sentence is here.",
                "The second one asks why?",
                "The third shouts loudly!"
            ]
        );
    }

    #[test]
    fn does_not_split_inside_tokens() {
        let text = "Version 3.14 of node.js shipped yesterday.";
        let sentences = tokenize_sentences(text, &cfg());
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].text, text);
    }

    #[test]
    fn drops_short_fragments_and_renumbers() {
        let text = "Hi. Ok! This one survives the filter. No. Another survivor sentence here.";
        let sentences = tokenize_sentences(text, &cfg());
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].ordinal, 1);
        assert_eq!(sentences[1].ordinal, 2);
        assert_eq!(sentences[1].text, "Another survivor sentence here.");
    }

    #[test]
    fn exactly_ten_chars_is_dropped() {
        // "Ten chars!" is exactly ten characters.
        let sentences = tokenize_sentences("Ten chars! Eleven char.", &cfg());
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].text, "Eleven char.");
    }

    #[test]
    fn newlines_count_as_whitespace() {
        let text = "First line sentence.\nSecond line sentence.";
        let sentences = tokenize_sentences(text, &cfg());
        assert_eq!(sentences.len(), 2);
    }

    #[test]
    fn wrapped_sentence_is_collapsed() {
        let sentences = tokenize_sentences("A sentence wrapped\n   across  two lines.", &cfg());
        assert_eq!(sentences[0].text, "A sentence wrapped across two lines.");
    }

    #[test]
    fn empty_text() {
        assert!(tokenize_sentences("", &cfg()).is_empty());
        assert!(tokenize_sentences("   ", &cfg()).is_empty());
    }
}
