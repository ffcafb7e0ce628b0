//! Canonical text layer for originality scoring.
//!
//! Every comparison the engine makes happens over canonical text, so this
//! crate is the single place that decides what "the same words" means.
//!
//! ## What we do
//!
//! - Unicode normalization (NFKC by default, configurable)
//! - Lowercasing and stripping of everything except word characters,
//!   hyphens and whitespace
//! - Whitespace collapsing and trimming
//! - Word tokenization with a minimum token length
//! - Stopword removal against a versioned, swappable list
//! - Sentence segmentation with 1-based ordinals
//! - Versioned identity hashes of the normalized text
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence. Same text and config, same
//! output on any machine. [`normalize`] is idempotent.
//!
//! ```rust
//! use canonical::{canonicalize, tokenize_sentences, CanonicalizeConfig, StopwordSet};
//!
//! let cfg = CanonicalizeConfig::default();
//! let doc = canonicalize("A blockchain voting system. Built on Ethereum!", &cfg).unwrap();
//! assert_eq!(doc.canonical_text, "a blockchain voting system built on ethereum");
//!
//! let stopwords = StopwordSet::english().unwrap();
//! let content = stopwords.remove_stopwords(&doc.words, &cfg);
//! assert_eq!(content, vec!["blockchain", "voting", "system", "built", "ethereum"]);
//!
//! let sentences = tokenize_sentences("A blockchain voting system. Built on Ethereum!", &cfg);
//! assert_eq!(sentences.len(), 2);
//! ```

mod config;
mod document;
mod error;
mod hash;
mod normalize;
mod sentence;
mod stopwords;
mod token;
mod whitespace;

pub use crate::config::CanonicalizeConfig;
pub use crate::document::CanonicalizedDocument;
pub use crate::error::CanonicalError;
pub use crate::hash::hash_canonical_bytes;
pub use crate::normalize::{canonicalize, normalize, Canonicalizer};
pub use crate::sentence::{tokenize_sentences, Sentence};
pub use crate::stopwords::StopwordSet;
pub use crate::token::{tokenize_all, tokenize_words};
pub use crate::whitespace::collapse_whitespace;
