use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use crate::config::CanonicalizeConfig;
use crate::document::CanonicalizedDocument;
use crate::error::CanonicalError;
use crate::hash::hash_canonical_bytes;
use crate::token::tokenize_words;

/// Extra passes allowed before `normalize` gives up waiting for a fixed point.
const MAX_SETTLE_PASSES: usize = 4;

/// Normalize raw text into its canonical comparison form.
///
/// Lowercases, replaces every character that is not a word character
/// (alphanumeric or `_`), a hyphen or whitespace with a delimiter, collapses
/// runs of delimiters into a single space and trims both ends.
///
/// The output is a fixed point: `normalize(normalize(t)) == normalize(t)`.
///
/// ```rust
/// use canonical::{normalize, CanonicalizeConfig};
///
/// let cfg = CanonicalizeConfig::default();
/// assert_eq!(normalize("  Deep-Learning, for IoT!  ", &cfg), "deep-learning for iot");
/// ```
pub fn normalize(input: &str, cfg: &CanonicalizeConfig) -> String {
    let mut out = normalize_pass(input, cfg);
    if out.is_ascii() {
        return out;
    }
    // Lowercasing NFKC output can yield text NFKC composes again
    // ("\u{1FBC}\u{301}" lowers to "\u{3AC}\u{345}", which composes to U+1FB4).
    for _ in 0..MAX_SETTLE_PASSES {
        let next = normalize_pass(&out, cfg);
        if next == out {
            break;
        }
        out = next;
    }
    out
}

fn normalize_pass(input: &str, cfg: &CanonicalizeConfig) -> String {
    let normalized: Cow<str> = if cfg.normalize_unicode {
        Cow::Owned(input.nfkc().collect::<String>())
    } else {
        Cow::Borrowed(input)
    };

    let mut out = String::with_capacity(normalized.len());
    let mut pending_space = false;

    for grapheme in normalized.graphemes(true) {
        // Lowercasing can expand one character into several.
        if cfg.lowercase {
            for lower in grapheme.to_lowercase().chars() {
                dispatch_char(lower, &mut out, &mut pending_space);
            }
        } else {
            for ch in grapheme.chars() {
                dispatch_char(ch, &mut out, &mut pending_space);
            }
        }
    }

    out
}

/// Normalize, tokenize and hash a document in one pass.
///
/// Fails only on an invalid configuration; empty input produces an empty
/// document. Build a [`Canonicalizer`] when canonicalizing many documents
/// under one configuration.
pub fn canonicalize(
    input: &str,
    cfg: &CanonicalizeConfig,
) -> Result<CanonicalizedDocument, CanonicalError> {
    Ok(Canonicalizer::new(cfg.clone())?.canonicalize(input))
}

/// A validated configuration, ready to canonicalize any number of documents.
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    cfg: CanonicalizeConfig,
}

impl Canonicalizer {
    pub fn new(cfg: CanonicalizeConfig) -> Result<Self, CanonicalError> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &CanonicalizeConfig {
        &self.cfg
    }

    pub fn normalize(&self, input: &str) -> String {
        normalize(input, &self.cfg)
    }

    pub fn canonicalize(&self, input: &str) -> CanonicalizedDocument {
        let canonical_text = normalize(input, &self.cfg);
        let words = tokenize_words(&canonical_text, &self.cfg)
            .into_iter()
            .map(str::to_owned)
            .collect();
        let sha256_hex = hash_canonical_bytes(self.cfg.version, canonical_text.as_bytes());

        CanonicalizedDocument {
            canonical_text,
            words,
            sha256_hex,
            canonical_version: self.cfg.version,
        }
    }
}

#[inline]
fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '-'
}

/// Decides whether a character is kept or acts as a delimiter.
fn dispatch_char(ch: char, out: &mut String, pending_space: &mut bool) {
    if is_word_char(ch) {
        if *pending_space {
            out.push(' ');
            *pending_space = false;
        }
        out.push(ch);
    } else if !out.is_empty() {
        // Leading delimiters are dropped; trailing ones never get flushed.
        *pending_space = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> CanonicalizeConfig {
        CanonicalizeConfig::default()
    }

    #[test]
    fn strips_punctuation_and_collapses_whitespace() {
        let out = normalize("Hello,   World!\n\tThis is   a TEST.", &cfg());
        assert_eq!(out, "hello world this is a test");
    }

    #[test]
    fn keeps_hyphen_and_underscore() {
        let out = normalize("real-time snake_case C++ ci/cd", &cfg());
        assert_eq!(out, "real-time snake_case c ci cd");
    }

    #[test]
    fn idempotent_on_mixed_inputs() {
        let inputs = [
            "",
            "   ",
            "Plain text.",
            "  Ünïcödé   Façade — déjà vu!! ",
            "Cafe\u{0301} and Caf\u{00E9}",
            "tabs\tand\nnewlines\r\nmixed",
            "--dashes-- __under__ ###",
            "emoji \u{1f600} inside",
            "İstanbul ﬁne ℌello",
        ];
        for input in inputs {
            let once = normalize(input, &cfg());
            let twice = normalize(&once, &cfg());
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn lowercase_then_recompose_settles() {
        for input in ["\u{1FBC}\u{301}", "\u{1FCC}\u{301}", "\u{1FFC}\u{301}"] {
            let once = normalize(input, &cfg());
            assert_eq!(normalize(&once, &cfg()), once, "{input:?}");
        }
        assert_eq!(normalize("\u{1FBC}\u{301}", &cfg()), "\u{1FB4}");
    }

    #[test]
    fn idempotent_across_code_points() {
        let cfg = cfg();
        let mut unsettled = Vec::new();
        for ch in (0u32..0x30000).filter_map(char::from_u32) {
            for input in [
                ch.to_string(),
                format!("a {ch} b"),
                format!("{ch}\u{301}"),
                format!("{ch}{ch}"),
            ] {
                let once = normalize(&input, &cfg);
                if normalize(&once, &cfg) != once {
                    unsettled.push(input);
                }
            }
        }
        assert!(
            unsettled.is_empty(),
            "{} inputs not idempotent, first {:?}",
            unsettled.len(),
            unsettled.first()
        );
    }

    #[test]
    fn idempotent_without_unicode_normalization() {
        let cfg = CanonicalizeConfig {
            normalize_unicode: false,
            ..CanonicalizeConfig::default()
        };
        for input in ["\u{130}stanbul", "\u{1FBC}\u{301}", "Cafe\u{0301}!", "\u{3A3}\u{3A3}"] {
            let once = normalize(input, &cfg);
            assert_eq!(normalize(&once, &cfg), once, "{input:?}");
        }
    }

    #[test]
    fn unicode_equivalence_nfkc() {
        let composed = normalize("Caf\u{00E9}", &cfg());
        let decomposed = normalize("Cafe\u{0301}", &cfg());
        assert_eq!(composed, decomposed);
    }

    #[test]
    fn empty_and_whitespace_only() {
        assert_eq!(normalize("", &cfg()), "");
        assert_eq!(normalize(" \n\t!!! ", &cfg()), "");
    }

    #[test]
    fn canonicalize_tokenizes_and_hashes() {
        let doc = canonicalize("An IoT system, built with Python.", &cfg()).unwrap();
        assert_eq!(doc.canonical_text, "an iot system built with python");
        assert_eq!(doc.words, vec!["iot", "system", "built", "with", "python"]);
        assert_eq!(doc.sha256_hex.len(), 64);
        assert_eq!(doc.canonical_version, 1);
    }

    #[test]
    fn canonicalize_same_text_same_hash() {
        let a = canonicalize("Hello   WORLD!", &cfg()).unwrap();
        let b = canonicalize("hello world", &cfg()).unwrap();
        assert_eq!(a.sha256_hex, b.sha256_hex);
    }

    #[test]
    fn canonicalizer_matches_free_function() {
        let canonicalizer = Canonicalizer::new(cfg()).unwrap();
        let text = "Sensors report to an MQTT broker.";
        assert_eq!(canonicalizer.canonicalize(text), canonicalize(text, &cfg()).unwrap());
        assert_eq!(canonicalizer.normalize(text), normalize(text, &cfg()));
    }

    #[test]
    fn canonicalize_rejects_invalid_config() {
        let bad = CanonicalizeConfig {
            version: 0,
            ..Default::default()
        };
        assert!(matches!(
            canonicalize("text", &bad),
            Err(CanonicalError::InvalidConfig(_))
        ));
    }
}
