//! # Originality matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` checks one submitted document against a corpus of reference
//! documents and produces a [`PlagiarismReport`]. It sits on top of the
//! `canonical`, `perceptual` and `structural` stages and reconciles their
//! signals into one score.
//!
//! Two detectors implement the [`Detector`] trait:
//! - [`LexicalDetector`]: shingle fingerprints plus sentence alignment.
//! - [`StructuralDetector`]: section profiles compared with fixed weights.
//!
//! [`DetectionMode`] selects which of them run. In hybrid mode an entry's
//! score is the larger of the two; a structural different-technology flag
//! caps the overall score at 40 and an exact duplicate from either detector
//! forces it to 100.
//!
//! ## Core Types
//!
//! - [`Document`], [`DocumentMetadata`], [`CorpusEntry`]: inputs.
//! - [`EngineConfig`]: detector settings, [`Thresholds`] and
//!   [`DivergenceWeights`], validated once at construction.
//! - [`Engine`]: read-only, `Send + Sync`, fans out over the corpus.
//! - [`PlagiarismReport`]: overall and originality scores, sorted evidence,
//!   flags and per-entry diagnostics.
//!
//! ## Example Usage
//!
//! ```
//! use matcher::{CorpusEntry, Document, DocumentMetadata, Engine, EngineConfig};
//!
//! let engine = Engine::new(EngineConfig::default())?;
//!
//! let text = "Leaf images are classified with TensorFlow to detect crop disease. \
//!             Farmers receive advice through a mobile application.";
//! let upload = Document::new(text)
//!     .with_metadata(DocumentMetadata::new().with_title("Crop Disease Detection"));
//! let corpus = vec![CorpusEntry::new("p-1", "Crop Disease Detection", text)];
//!
//! let report = engine.check(&upload, &corpus);
//! assert!(report.is_exact_duplicate());
//! assert_eq!(report.overall_score(), 100);
//! assert_eq!(report.source_matches()[0].id, "p-1");
//! # Ok::<(), matcher::ConfigError>(())
//! ```

mod combine;
mod config;
mod detector;
mod engine;
mod metrics;
mod report;
mod types;

pub use crate::combine::{
    assess_sections, combine_entry, effective_score, overall_score, EntryVerdict,
    StructuralSignal,
};
pub use crate::config::{ConfigError, DivergenceWeights, EngineConfig, Thresholds};
pub use crate::detector::{
    Detector, LexicalAnalysis, LexicalDetector, LexicalSignal, PreparedDocument,
    StructuralDetector,
};
pub use crate::engine::Engine;
pub use crate::metrics::{set_engine_metrics, EngineMetrics};
pub use crate::types::{
    CorpusEntry, DetectionMode, Document, DocumentMetadata, EntryDiagnostic, EntryError,
    LexicalSummary, MatchType, PlagiarismReport, SectionMatch, SentenceMatch, SimilarityLevel,
    SourceMatch,
};
