//! Configuration and error types for lexical fingerprinting and sentence
//! alignment.
//!
//! Free of any I/O or environment-dependent behavior so that fingerprints and
//! alignments are pure functions of `(canonical tokens, config)`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for word-shingle fingerprinting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerceptualConfig {
    /// Configuration schema version.
    ///
    /// Any algorithmic change that can affect fingerprints must bump this
    /// version.
    pub version: u32,
    /// Number of words per shingle.
    pub k: usize,
    /// Seed for token hashing and the rolling-hash base.
    ///
    /// Fingerprints are only comparable when both sides used the same seed.
    pub seed: u64,
    /// Upper bound on the number of tokens fingerprinted per document.
    ///
    /// Longer inputs are truncated and the fingerprint is marked as such.
    pub max_tokens: usize,
}

impl PerceptualConfig {
    /// Create a new configuration with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shingle size (k). Typical values: 3-9.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Set the hashing seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the token budget per document.
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), PerceptualError> {
        if self.version < 1 {
            return Err(PerceptualError::InvalidConfigVersion {
                version: self.version,
            });
        }
        if self.k < 1 {
            return Err(PerceptualError::InvalidConfigK { k: self.k });
        }
        if self.max_tokens < 1 {
            return Err(PerceptualError::InvalidConfigMaxTokens {
                max_tokens: self.max_tokens,
            });
        }
        Ok(())
    }
}

impl Default for PerceptualConfig {
    fn default() -> Self {
        Self {
            version: 1,
            k: 3,
            seed: 0xF00D_BAAD_F00D_BAAD,
            max_tokens: 50_000,
        }
    }
}

/// Configuration for sentence alignment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlignConfig {
    /// Maximum number of sentences considered on each side of a comparison.
    ///
    /// Alignment is O(U×S); sentences past this bound are ignored and the
    /// alignment is flagged as truncated.
    pub max_sentences: usize,
    /// Minimum similarity (0-100) for a best match to be retained.
    pub min_similarity: f64,
    /// Bonus added per position where both sentences carry the same word.
    pub positional_bonus_step: f64,
    /// Cap on the total positional bonus.
    pub positional_bonus_cap: f64,
}

impl AlignConfig {
    pub fn with_max_sentences(mut self, max_sentences: usize) -> Self {
        self.max_sentences = max_sentences;
        self
    }

    pub fn with_min_similarity(mut self, min_similarity: f64) -> Self {
        self.min_similarity = min_similarity;
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), PerceptualError> {
        if self.max_sentences == 0 {
            return Err(PerceptualError::InvalidAlignConfig(
                "max_sentences must be >= 1".into(),
            ));
        }
        if !(0.0..=100.0).contains(&self.min_similarity) {
            return Err(PerceptualError::InvalidAlignConfig(format!(
                "min_similarity must be within [0, 100] (got {})",
                self.min_similarity
            )));
        }
        if !(self.positional_bonus_step >= 0.0) {
            return Err(PerceptualError::InvalidAlignConfig(
                "positional_bonus_step must be >= 0".into(),
            ));
        }
        if !(0.0..=100.0).contains(&self.positional_bonus_cap) {
            return Err(PerceptualError::InvalidAlignConfig(
                "positional_bonus_cap must be within [0, 100]".into(),
            ));
        }
        Ok(())
    }
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            max_sentences: 500,
            min_similarity: 60.0,
            positional_bonus_step: 5.0,
            positional_bonus_cap: 20.0,
        }
    }
}

/// Errors returned by the lexical fingerprinting layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PerceptualError {
    #[error("invalid config: k must be >= 1 (got {k})")]
    InvalidConfigK { k: usize },

    #[error("invalid config version {version}; expected >= 1")]
    InvalidConfigVersion { version: u32 },

    #[error("invalid config: max_tokens must be >= 1 (got {max_tokens})")]
    InvalidConfigMaxTokens { max_tokens: usize },

    #[error("invalid alignment config: {0}")]
    InvalidAlignConfig(String),
}
