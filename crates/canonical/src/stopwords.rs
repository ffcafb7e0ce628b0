//! Stopword filtering.
//!
//! The stopword list is configuration data, not code: the built-in English
//! list ships as a versioned JSON asset and callers can load their own with
//! [`StopwordSet::from_json`] or [`StopwordSet::from_words`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::CanonicalizeConfig;
use crate::error::CanonicalError;

const ENGLISH_STOPWORDS: &str = include_str!("../assets/stopwords_en.json");

#[derive(Debug, Deserialize)]
struct StopwordFile {
    version: u32,
    #[serde(default)]
    language: Option<String>,
    words: Vec<String>,
}

/// An immutable, validated set of stopwords.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StopwordSet {
    version: u32,
    language: Option<String>,
    words: HashSet<String>,
}

impl StopwordSet {
    /// The built-in English list.
    pub fn english() -> Result<Self, CanonicalError> {
        Self::from_json(ENGLISH_STOPWORDS)
    }

    /// Parse a stopword file: `{"version": 1, "language": "en", "words": [...]}`.
    pub fn from_json(json: &str) -> Result<Self, CanonicalError> {
        let file: StopwordFile = serde_json::from_str(json)
            .map_err(|err| CanonicalError::InvalidStopwords(err.to_string()))?;
        let mut set = Self::from_words(file.version, file.words)?;
        set.language = file.language;
        Ok(set)
    }

    /// Build a set from explicit words.
    ///
    /// Every word must be non-empty, lowercase and free of whitespace, since
    /// lookups happen against normalized tokens.
    pub fn from_words<I, S>(version: u32, words: I) -> Result<Self, CanonicalError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if version == 0 {
            return Err(CanonicalError::InvalidStopwords(
                "stopword list version must be >= 1".into(),
            ));
        }
        let mut set = HashSet::new();
        for word in words {
            let word: String = word.into();
            if word.is_empty() || word.chars().any(char::is_whitespace) {
                return Err(CanonicalError::InvalidStopwords(format!(
                    "stopword {word:?} must be a single non-empty token"
                )));
            }
            if word.to_lowercase() != word {
                return Err(CanonicalError::InvalidStopwords(format!(
                    "stopword {word:?} must be lowercase"
                )));
            }
            set.insert(word);
        }
        if set.is_empty() {
            return Err(CanonicalError::InvalidStopwords(
                "stopword list is empty".into(),
            ));
        }
        Ok(Self {
            version,
            language: None,
            words: set,
        })
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    /// Drop stopwords and tokens shorter than `cfg.min_token_len`, keeping order.
    pub fn remove_stopwords<'a, S: AsRef<str>>(
        &self,
        tokens: &'a [S],
        cfg: &CanonicalizeConfig,
    ) -> Vec<&'a str> {
        tokens
            .iter()
            .map(|token| -> &'a str { token.as_ref() })
            .filter(|token| token.chars().count() >= cfg.min_token_len && !self.contains(token))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_list_loads() {
        let set = StopwordSet::english().expect("built-in list is valid");
        assert!(set.contains("the"));
        assert!(set.contains("with"));
        assert!(!set.contains("blockchain"));
        assert_eq!(set.version(), 1);
        assert_eq!(set.language(), Some("en"));
    }

    #[test]
    fn removes_stopwords_and_short_tokens() {
        let set = StopwordSet::english().unwrap();
        let cfg = CanonicalizeConfig::default();
        let tokens = vec!["the", "smart", "parking", "system", "with", "iot", "go"];
        assert_eq!(
            set.remove_stopwords(&tokens, &cfg),
            vec!["smart", "parking", "system", "iot"]
        );
    }

    #[test]
    fn rejects_malformed_lists() {
        assert!(StopwordSet::from_words(1, Vec::<String>::new()).is_err());
        assert!(StopwordSet::from_words(0, ["the"]).is_err());
        assert!(StopwordSet::from_words(1, ["The"]).is_err());
        assert!(StopwordSet::from_words(1, ["two words"]).is_err());
        assert!(StopwordSet::from_json("{\"version\": 1}").is_err());
    }
}
