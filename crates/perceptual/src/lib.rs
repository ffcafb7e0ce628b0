//! # Lexical fingerprinting and sentence alignment
//!
//! This crate turns canonical word tokens into comparable lexical signals:
//! a deduplicated set of 32-bit shingle fingerprints, Jaccard similarity
//! over any ordered set, and a sentence aligner that pairs each uploaded
//! sentence with its closest source sentence.
//!
//! ## Contract
//!
//! - Consumes canonical, stopword-filtered tokens produced upstream.
//! - Never performs normalization or tokenization itself.
//! - Pure functions of `(tokens, config)`: no I/O, no clocks, no globals.
//!
//! Invariant: for the same token sequence and the same [`PerceptualConfig`],
//! the fingerprint is bit identical.
//!
//! ## Pipeline
//!
//! 1.  **Shingling**: contiguous `k`-token windows, or the whole sequence
//!     when it is shorter than `k`.
//! 2.  **Hashing**: each window is hashed with a seeded polynomial rolling
//!     hash over per-token xxh3 values, folded to 32 bits.
//! 3.  **Deduplication**: hashes are collected into an ordered
//!     [`FingerprintSet`].
//!
//! ## Example Usage
//!
//! ```
//! use perceptual::{fingerprint_tokens, PerceptualConfig};
//!
//! let tokens = vec!["smart", "parking", "sensor", "network", "arduino"];
//! let fp = fingerprint_tokens(&tokens, &PerceptualConfig::default()).unwrap();
//!
//! assert_eq!(fp.shingle_count, 3);
//! assert_eq!(fp.hashes.jaccard(&fp.hashes), 100.0);
//! assert_eq!(fp.meta.k, 3);
//! ```

pub mod align;
pub mod config;
pub mod fingerprint;
mod shingles;
mod similarity;

pub use crate::align::{AlignableSentence, AlignedSentence, Alignment, SentenceAligner};
pub use crate::config::{AlignConfig, PerceptualConfig, PerceptualError};
pub use crate::fingerprint::{FingerprintMeta, FingerprintSet, LexicalFingerprint};
pub use crate::shingles::{generate_shingles, hash_shingle, make_shingles_rolling};
pub use crate::similarity::{clamp_score, jaccard};

/// Current lexical algorithm version for this crate.
pub const PERCEPTUAL_VERSION: u16 = 1;

/// Human-readable algorithm identifier.
pub const PERCEPTUAL_ALGORITHM: &str = "rolling_shingle32_v1";

/// Deduplicate raw shingle hashes into a fingerprint set.
pub fn fingerprint_set<I: IntoIterator<Item = u32>>(hashes: I) -> FingerprintSet {
    FingerprintSet::from_hashes(hashes)
}

/// Fingerprinter bound to a configuration that has already been validated.
#[derive(Debug, Clone)]
pub struct Fingerprinter {
    cfg: PerceptualConfig,
}

impl Fingerprinter {
    pub fn new(cfg: PerceptualConfig) -> Result<Self, PerceptualError> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &PerceptualConfig {
        &self.cfg
    }

    /// Fingerprint a token sequence.
    ///
    /// Tokens past `max_tokens` are ignored and the result is marked
    /// `truncated`. An empty token slice yields an empty fingerprint.
    pub fn fingerprint<S: AsRef<str>>(&self, tokens: &[S]) -> LexicalFingerprint {
        let cfg = &self.cfg;
        let truncated = tokens.len() > cfg.max_tokens;
        let window = &tokens[..tokens.len().min(cfg.max_tokens)];

        let shingles = make_shingles_rolling(window, cfg.k, cfg.seed);
        let shingle_count = shingles.len();

        LexicalFingerprint {
            hashes: fingerprint_set(shingles),
            token_count: window.len(),
            shingle_count,
            truncated,
            meta: FingerprintMeta {
                perceptual_version: PERCEPTUAL_VERSION,
                algorithm_name: PERCEPTUAL_ALGORITHM.to_string(),
                k: cfg.k,
                seed: cfg.seed,
                config_version: cfg.version,
            },
        }
    }
}

/// Validate `cfg` and fingerprint `tokens` in one call.
pub fn fingerprint_tokens<S>(
    tokens: &[S],
    cfg: &PerceptualConfig,
) -> Result<LexicalFingerprint, PerceptualError>
where
    S: AsRef<str>,
{
    Ok(Fingerprinter::new(cfg.clone())?.fingerprint(tokens))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_for_same_input() {
        let tokens = ["blockchain", "voting", "system", "ethereum", "smart", "contracts"];
        let cfg = PerceptualConfig::default();
        let a = fingerprint_tokens(&tokens, &cfg).unwrap();
        let b = fingerprint_tokens(&tokens, &cfg).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn short_input_yields_single_shingle() {
        let fp = fingerprint_tokens(&["chatbot", "rasa"], &PerceptualConfig::default()).unwrap();
        assert_eq!(fp.shingle_count, 1);
        assert_eq!(fp.hashes.len(), 1);
        assert!(!fp.truncated);
    }

    #[test]
    fn empty_input_yields_empty_fingerprint() {
        let tokens: [&str; 0] = [];
        let fp = fingerprint_tokens(&tokens, &PerceptualConfig::default()).unwrap();
        assert!(fp.hashes.is_empty());
        assert_eq!(fp.token_count, 0);
    }

    #[test]
    fn truncates_past_max_tokens() {
        let tokens: Vec<String> = (0..20).map(|i| format!("word{i}")).collect();
        let cfg = PerceptualConfig::new().with_max_tokens(10);
        let fp = fingerprint_tokens(&tokens, &cfg).unwrap();
        assert!(fp.truncated);
        assert_eq!(fp.token_count, 10);
        assert_eq!(fp.shingle_count, 8);
    }

    #[test]
    fn repeated_windows_are_deduplicated() {
        let tokens = ["alpha", "beta", "gamma", "alpha", "beta", "gamma"];
        let fp = fingerprint_tokens(&tokens, &PerceptualConfig::default()).unwrap();
        assert_eq!(fp.shingle_count, 4);
        assert_eq!(fp.hashes.len(), 3);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = PerceptualConfig::new().with_k(0);
        assert!(matches!(
            fingerprint_tokens(&["a"], &cfg),
            Err(PerceptualError::InvalidConfigK { k: 0 })
        ));
    }

    #[test]
    fn different_seeds_are_not_comparable() {
        let tokens = ["face", "recognition", "attendance", "opencv"];
        let a = fingerprint_tokens(&tokens, &PerceptualConfig::new().with_seed(1)).unwrap();
        let b = fingerprint_tokens(&tokens, &PerceptualConfig::new().with_seed(2)).unwrap();
        assert_ne!(a.hashes, b.hashes);
    }

    #[test]
    fn metadata_records_config() {
        let cfg = PerceptualConfig::new().with_k(2).with_seed(9);
        let fp = fingerprint_tokens(&["iot", "mqtt", "esp32"], &cfg).unwrap();
        assert_eq!(fp.meta.perceptual_version, PERCEPTUAL_VERSION);
        assert_eq!(fp.meta.algorithm_name, PERCEPTUAL_ALGORITHM);
        assert_eq!(fp.meta.k, 2);
        assert_eq!(fp.meta.seed, 9);
    }
}
