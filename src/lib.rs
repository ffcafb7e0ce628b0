//! Workspace umbrella crate for document originality scoring.
//!
//! This crate re-exports the pipeline stages (text normalization, lexical
//! fingerprints, section profiles and the matcher) so callers can check a
//! document against a corpus through a single dependency, and adds YAML
//! configuration loading on top.

mod config;

pub use canonical::{
    CanonicalError, CanonicalizeConfig, CanonicalizedDocument, Canonicalizer, Sentence,
    StopwordSet, canonicalize, collapse_whitespace, hash_canonical_bytes, normalize,
    tokenize_sentences, tokenize_words,
};
pub use matcher::{
    ConfigError, CorpusEntry, DetectionMode, Detector, DivergenceWeights, Document,
    DocumentMetadata, Engine, EngineConfig, EngineMetrics, EntryDiagnostic, EntryError,
    LexicalDetector, LexicalSummary, MatchType, PlagiarismReport, PreparedDocument, SectionMatch,
    SentenceMatch, SimilarityLevel, SourceMatch, StructuralDetector, Thresholds,
    set_engine_metrics,
};
pub use perceptual::{
    AlignConfig, Alignment, FingerprintSet, Fingerprinter, LexicalFingerprint, PerceptualConfig,
    PerceptualError, SentenceAligner, fingerprint_tokens, jaccard,
};
pub use structural::{
    Section, SectionScore, SectionScores, SectionWeights, StructuralConfig, StructuralError,
    Vocabulary,
};

pub use crate::config::{
    CanonicalYamlConfig, ConfigLoadError, EngineYamlConfig, LexicalYamlConfig,
    OriginalityConfig, StructuralYamlConfig,
};

use thiserror::Error;

/// Errors raised by the convenience helpers in this crate.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("engine configuration rejected: {0}")]
    Config(#[from] ConfigError),
    #[error("malformed document JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Build an engine from `cfg` and check `document` against `corpus`.
///
/// Reuse an [`Engine`] instead when checking many documents.
pub fn check_document(
    document: &Document,
    corpus: &[CorpusEntry],
    cfg: &EngineConfig,
) -> Result<PlagiarismReport, ConfigError> {
    Ok(Engine::new(cfg.clone())?.check(document, corpus))
}

/// Parse a document and a corpus from JSON and check them.
pub fn check_json(
    document_json: &str,
    corpus_json: &str,
    cfg: &EngineConfig,
) -> Result<PlagiarismReport, CheckError> {
    let document: Document = serde_json::from_str(document_json)?;
    let corpus: Vec<CorpusEntry> = serde_json::from_str(corpus_json)?;
    Ok(check_document(&document, &corpus, cfg)?)
}

const DEMO_UPLOAD: &str = include_str!("../assets/demo/upload.json");
const DEMO_CORPUS: &str = include_str!("../assets/demo/corpus.json");

/// The bundled sample submission and the three-project sample corpus.
pub fn demo_inputs() -> Result<(Document, Vec<CorpusEntry>), serde_json::Error> {
    Ok((
        serde_json::from_str(DEMO_UPLOAD)?,
        serde_json::from_str(DEMO_CORPUS)?,
    ))
}

/// Checks the bundled sample submission against the bundled sample corpus.
/// Useful for demos and integration smoke tests.
pub fn demo_report(cfg: &EngineConfig) -> Result<PlagiarismReport, CheckError> {
    check_json(DEMO_UPLOAD, DEMO_CORPUS, cfg)
}
