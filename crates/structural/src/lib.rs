//! # Structural section comparison
//!
//! Documents are compared section by section instead of word by word. Each
//! document is reduced to a [`SectionProfile`]: the long words of its title,
//! the key phrases of its body, the technologies and methods it mentions and
//! its tags. Two profiles are then compared with Jaccard similarity per
//! section, weighted by fixed [`SectionWeights`].
//!
//! Vocabularies are data, not code: [`Vocabulary::builtin`] loads the bundled
//! asset and callers may supply their own.
//!
//! ```
//! use canonical::CanonicalizeConfig;
//! use structural::{
//!     Section, SectionComparator, SectionExtractor, SectionInput, StructuralConfig, Vocabulary,
//! };
//!
//! let cfg = StructuralConfig::default();
//! let extractor =
//!     SectionExtractor::new(Vocabulary::builtin()?, CanonicalizeConfig::default(), cfg.clone())?;
//! let comparator = SectionComparator::new(&cfg)?;
//!
//! let a = extractor.extract(&SectionInput {
//!     title: Some("Crop Disease Detection"),
//!     text: "Leaf images are classified with TensorFlow and OpenCV.",
//!     ..Default::default()
//! });
//! let b = extractor.extract(&SectionInput {
//!     title: Some("Plant Disease Detection"),
//!     text: "Leaf photos are classified using PyTorch.",
//!     ..Default::default()
//! });
//!
//! let scores = comparator.compare(&a, &b);
//! assert_eq!(scores.similarity(Section::Technologies), 0.0);
//! assert_eq!(scores.similarity(Section::Title), 50.0);
//! # Ok::<(), structural::StructuralError>(())
//! ```

mod compare;
mod config;
mod profile;
mod vocabulary;
mod weights;

pub use crate::compare::{SectionComparator, SectionScore, SectionScores};
pub use crate::config::{StructuralConfig, StructuralError};
pub use crate::profile::{SectionExtractor, SectionInput, SectionProfile};
pub use crate::vocabulary::Vocabulary;
pub use crate::weights::{Section, SectionWeights};
