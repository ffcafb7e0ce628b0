//! Configuration types for the canonical text layer.
//!
//! This module defines [`CanonicalizeConfig`], which controls how raw text is
//! normalized, split into words and split into sentences.
//!
//! # Versioning
//!
//! The `version` field is part of the document identity hash. Any change to
//! normalization behavior (even bug fixes) must be accompanied by a version
//! bump so that hashes from different versions never collide.
//!
//! # Examples
//!
//! ```rust
//! use canonical::CanonicalizeConfig;
//!
//! let config = CanonicalizeConfig::default();
//! assert_eq!(config.version, 1);
//! assert!(config.normalize_unicode);
//! assert!(config.lowercase);
//! assert_eq!(config.min_token_len, 3);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Configuration for the canonical text layer.
///
/// Cheap to clone and serializable so it can be embedded in higher-level
/// engine configuration files.
///
/// ```json
/// {
///   "version": 1,
///   "normalize_unicode": true,
///   "lowercase": true,
///   "min_token_len": 3,
///   "min_sentence_chars": 11
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CanonicalizeConfig {
    /// Version of the normalization rules.
    ///
    /// Must be >= 1. Version 0 is reserved and rejected by [`validate`](Self::validate).
    pub version: u32,

    /// If true, apply Unicode NFKC normalization before other transforms.
    ///
    /// Composed and decomposed forms of the same character ("é" as U+00E9 or
    /// "e" + U+0301) then normalize to the same text.
    pub normalize_unicode: bool,

    /// If true, apply locale-free Unicode lowercasing.
    pub lowercase: bool,

    /// Minimum character length of a word token. Shorter tokens are dropped
    /// by [`tokenize_words`](crate::tokenize_words).
    pub min_token_len: usize,

    /// Minimum character length of a sentence. Shorter fragments are dropped
    /// by [`tokenize_sentences`](crate::tokenize_sentences).
    pub min_sentence_chars: usize,
}

impl CanonicalizeConfig {
    /// Create a configuration with the default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum word token length.
    pub fn with_min_token_len(mut self, min_token_len: usize) -> Self {
        self.min_token_len = min_token_len;
        self
    }

    /// Enable or disable NFKC normalization.
    pub fn with_unicode_normalization(mut self, normalize_unicode: bool) -> Self {
        self.normalize_unicode = normalize_unicode;
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        if self.min_token_len == 0 {
            return Err(CanonicalError::InvalidConfig(
                "min_token_len must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for CanonicalizeConfig {
    /// Defaults:
    ///
    /// - `version`: 1
    /// - `normalize_unicode`: true
    /// - `lowercase`: true
    /// - `min_token_len`: 3 (tokens of length <= 2 are noise)
    /// - `min_sentence_chars`: 11 (fragments of <= 10 characters are dropped)
    fn default() -> Self {
        Self {
            version: 1,
            normalize_unicode: true,
            lowercase: true,
            min_token_len: 3,
            min_sentence_chars: 11,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(CanonicalizeConfig::default().validate().is_ok());
    }

    #[test]
    fn version_zero_rejected() {
        let cfg = CanonicalizeConfig {
            version: 0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(CanonicalError::InvalidConfig(_))
        ));
    }

    #[test]
    fn zero_token_len_rejected() {
        let cfg = CanonicalizeConfig::new().with_min_token_len(0);
        let err = cfg.validate().expect_err("config should be invalid");
        assert!(err.to_string().contains("min_token_len"));
    }

    #[test]
    fn serde_roundtrip() {
        let cfg = CanonicalizeConfig::new().with_unicode_normalization(false);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: CanonicalizeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
