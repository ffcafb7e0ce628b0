//! Hashing utilities for the canonical text layer.
//!
//! ## Document identity hash
//!
//! ```text
//! SHA-256(version.to_be_bytes() || 0x00 || canonical_text_bytes)
//! ```
//!
//! The version is included so that text normalized under different rules
//! never shares an identity.
//!
//! ```rust
//! use canonical::hash_canonical_bytes;
//!
//! let v1 = hash_canonical_bytes(1, b"hello world");
//! assert_eq!(v1.len(), 64);
//! assert_ne!(v1, hash_canonical_bytes(2, b"hello world"));
//! ```

use sha2::{Digest, Sha256};

/// Compute the canonical identity hash for canonical text and version.
///
/// Two documents with equal identity hashes normalized to the same text, so
/// the lexical detector treats a hash match as an exact duplicate without
/// looking at shingles.
pub fn hash_canonical_bytes(canonical_version: u32, canonical_bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical_version.to_be_bytes());
    hasher.update([0]);
    hasher.update(canonical_bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_hash_determinism() {
        for text in ["", "hello world", "こんにちは世界", "emoji \u{1f600}"] {
            assert_eq!(
                hash_canonical_bytes(1, text.as_bytes()),
                hash_canonical_bytes(1, text.as_bytes())
            );
        }
    }

    #[test]
    fn canonical_hash_includes_version() {
        let v1 = hash_canonical_bytes(1, b"same text");
        let v2 = hash_canonical_bytes(2, b"same text");
        assert_ne!(v1, v2);
        assert_eq!(v1, hash_canonical_bytes(1, b"same text"));
    }
}
