//! Fingerprint types for the lexical layer.
//!
//! The fingerprint schema and metadata are part of the public contract: any
//! incompatible change must result in a new `perceptual_version`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::similarity::jaccard;

/// Deduplicated set of 32-bit shingle hashes.
///
/// Stored ordered so serialized fingerprints are byte-stable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FingerprintSet(BTreeSet<u32>);

impl FingerprintSet {
    /// Build a set from shingle hashes, dropping duplicates.
    pub fn from_hashes<I: IntoIterator<Item = u32>>(hashes: I) -> Self {
        Self(hashes.into_iter().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, hash: u32) -> bool {
        self.0.contains(&hash)
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    /// Jaccard similarity (0-100) against another fingerprint set.
    pub fn jaccard(&self, other: &FingerprintSet) -> f64 {
        jaccard(&self.0, &other.0)
    }
}

/// Lexical fingerprint of one document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LexicalFingerprint {
    /// Unique shingle hashes.
    pub hashes: FingerprintSet,
    /// Number of tokens that were shingled (after truncation).
    pub token_count: usize,
    /// Number of shingles produced before deduplication.
    pub shingle_count: usize,
    /// True when the input exceeded `max_tokens` and was cut.
    pub truncated: bool,
    /// How, and with which configuration, the fingerprint was produced.
    pub meta: FingerprintMeta,
}

/// Metadata for traceability and determinism.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FingerprintMeta {
    /// Lexical algorithm version owned by this crate.
    pub perceptual_version: u16,
    /// Human-readable algorithm identifier.
    pub algorithm_name: String,
    /// Shingle length in tokens.
    pub k: usize,
    /// Hash seed.
    pub seed: u64,
    /// Configuration schema version supplied when computing this fingerprint.
    pub config_version: u32,
}
