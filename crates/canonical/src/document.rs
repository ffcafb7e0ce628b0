//! Canonical document type.
//!
//! A [`CanonicalizedDocument`] is what every downstream stage consumes: the
//! normalized text, its word tokens and a version-aware identity hash.
//!
//! ```rust
//! use canonical::{canonicalize, CanonicalizeConfig};
//!
//! let doc = canonicalize("Smart Parking with IoT sensors.", &CanonicalizeConfig::default()).unwrap();
//! assert_eq!(doc.canonical_text, "smart parking with iot sensors");
//! assert_eq!(doc.word_count(), 5);
//! assert!(!doc.is_empty());
//! ```

use serde::{Deserialize, Serialize};

/// The canonical representation of a text document.
///
/// For a fixed [`CanonicalizeConfig`](crate::CanonicalizeConfig) version and
/// input text, every field is deterministic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CanonicalizedDocument {
    /// Normalized text (lowercase, word characters, single spaces).
    pub canonical_text: String,
    /// Word tokens of `canonical_text` that pass the length filter, in order.
    pub words: Vec<String>,
    /// SHA-256 identity of `canonical_text` under `canonical_version`.
    pub sha256_hex: String,
    /// Normalization version that produced this document.
    pub canonical_version: u32,
}

impl CanonicalizedDocument {
    /// True when normalization left no text at all.
    pub fn is_empty(&self) -> bool {
        self.canonical_text.is_empty()
    }

    /// Number of word tokens.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}
