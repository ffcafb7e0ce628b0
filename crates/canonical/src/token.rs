use crate::config::CanonicalizeConfig;

/// Split normalized text into word tokens.
///
/// Assumes `text` has already been through [`normalize`](crate::normalize):
/// tokens are whitespace separated and tokens shorter than
/// `cfg.min_token_len` characters are dropped.
///
/// ```rust
/// use canonical::{tokenize_words, CanonicalizeConfig};
///
/// let cfg = CanonicalizeConfig::default();
/// assert_eq!(tokenize_words("an ar app in go", &cfg), vec!["app"]);
/// ```
pub fn tokenize_words<'a>(text: &'a str, cfg: &CanonicalizeConfig) -> Vec<&'a str> {
    text.split_whitespace()
        .filter(|token| token.chars().count() >= cfg.min_token_len)
        .collect()
}

/// Split normalized text on whitespace without any length filter.
///
/// Vocabulary lookups need this: short terms such as `go`, `r` or `ar` are
/// legitimate technology names.
pub fn tokenize_all(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}
