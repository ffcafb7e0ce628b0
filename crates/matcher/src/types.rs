use serde::{Deserialize, Serialize};
use structural::{Section, SectionScore};
use thiserror::Error;

/// Optional structured information supplied with a document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub methodology: Option<String>,
    /// Short summary. When absent the first characters of the text stand in.
    #[serde(default)]
    pub description: Option<String>,
}

impl DocumentMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_methodology(mut self, methodology: impl Into<String>) -> Self {
        self.methodology = Some(methodology.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Plain text plus optional metadata. Immutable input to a check.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub text: String,
    #[serde(default)]
    pub metadata: Option<DocumentMetadata>,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: DocumentMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub(crate) fn title(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.title.as_deref())
    }
}

/// A reference document in the corpus.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CorpusEntry {
    pub id: String,
    pub title: String,
    pub document: Document,
}

impl CorpusEntry {
    pub fn new(id: impl Into<String>, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            document: Document::new(text),
        }
    }

    pub fn with_metadata(mut self, metadata: DocumentMetadata) -> Self {
        self.document.metadata = Some(metadata);
        self
    }

    /// Entry title, falling back to the document metadata title.
    pub(crate) fn effective_title(&self) -> Option<&str> {
        if self.title.trim().is_empty() {
            self.document.title()
        } else {
            Some(self.title.as_str())
        }
    }
}

/// Which detectors run during a check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMode {
    /// Section-weighted comparison only.
    Structural,
    /// Shingle fingerprints and sentence alignment only.
    Lexical,
    /// Both detectors, reconciled per entry.
    #[default]
    Hybrid,
}

impl DetectionMode {
    pub fn runs_structural(&self) -> bool {
        matches!(self, DetectionMode::Structural | DetectionMode::Hybrid)
    }

    pub fn runs_lexical(&self) -> bool {
        matches!(self, DetectionMode::Lexical | DetectionMode::Hybrid)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionMode::Structural => "structural",
            DetectionMode::Lexical => "lexical",
            DetectionMode::Hybrid => "hybrid",
        }
    }
}

/// How closely a matched fragment follows its source.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Exact,
    Paraphrase,
    Partial,
}

/// Classification of the overall score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityLevel {
    Duplicate,
    High,
    Moderate,
    Low,
    #[default]
    Unique,
}

impl SimilarityLevel {
    pub fn label(&self) -> &'static str {
        match self {
            SimilarityLevel::Duplicate => "Duplicate Content",
            SimilarityLevel::High => "High Similarity",
            SimilarityLevel::Moderate => "Moderate Similarity",
            SimilarityLevel::Low => "Low Similarity",
            SimilarityLevel::Unique => "Original Content",
        }
    }
}

/// An uploaded sentence paired with its closest source sentence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SentenceMatch {
    pub uploaded_sentence: String,
    pub source_sentence: String,
    pub source_id: String,
    pub source_title: String,
    pub similarity: f64,
    /// 1-based position of the uploaded sentence.
    pub line_number: usize,
    pub match_type: MatchType,
}

/// A section of an included source that closely matches the upload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectionMatch {
    pub section: Section,
    pub source_id: String,
    pub source_title: String,
    pub similarity: f64,
    pub match_type: MatchType,
}

/// Lexical evidence for one source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LexicalSummary {
    pub fingerprint_jaccard: f64,
    pub sentence_match_ratio: f64,
    pub matched_sentences: usize,
}

/// One corpus entry whose combined score cleared the inclusion threshold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceMatch {
    pub id: String,
    pub title: String,
    /// Combined score rounded to the nearest integer.
    pub match_percentage: u8,
    pub estimated_words_copied: usize,
    pub estimated_sentences_matched: usize,
    /// Empty when the structural detector did not run.
    pub section_scores: Vec<SectionScore>,
    /// Absent when the lexical detector did not run.
    pub lexical: Option<LexicalSummary>,
    pub is_exact_duplicate: bool,
    pub is_different_technology: bool,
}

/// A corpus entry that was skipped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntryDiagnostic {
    pub entry_id: String,
    pub entry_index: usize,
    pub message: String,
}

/// Reasons a corpus entry cannot be evaluated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("corpus entry has an empty id")]
    EmptyId,
    #[error("corpus entry {id} has no title and no text after normalization")]
    EmptyContent { id: String },
}

/// Result of checking one document against a corpus.
///
/// Built once by the engine and read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlagiarismReport {
    pub(crate) overall_score: u8,
    pub(crate) originality_score: u8,
    pub(crate) level: SimilarityLevel,
    pub(crate) total_words: usize,
    pub(crate) total_words_copied: usize,
    pub(crate) sentence_matches: Vec<SentenceMatch>,
    pub(crate) section_matches: Vec<SectionMatch>,
    pub(crate) source_matches: Vec<SourceMatch>,
    pub(crate) is_exact_duplicate: bool,
    pub(crate) is_different_technology: bool,
    pub(crate) truncated: bool,
    pub(crate) diagnostics: Vec<EntryDiagnostic>,
    pub(crate) mode: DetectionMode,
}

impl PlagiarismReport {
    /// Report for an upload with no usable text.
    pub fn empty(mode: DetectionMode) -> Self {
        Self {
            overall_score: 0,
            originality_score: 100,
            level: SimilarityLevel::Unique,
            total_words: 0,
            total_words_copied: 0,
            sentence_matches: Vec::new(),
            section_matches: Vec::new(),
            source_matches: Vec::new(),
            is_exact_duplicate: false,
            is_different_technology: false,
            truncated: false,
            diagnostics: Vec::new(),
            mode,
        }
    }

    pub fn overall_score(&self) -> u8 {
        self.overall_score
    }

    /// `100 - overall_score`.
    pub fn originality_score(&self) -> u8 {
        self.originality_score
    }

    pub fn level(&self) -> SimilarityLevel {
        self.level
    }

    pub fn total_words(&self) -> usize {
        self.total_words
    }

    pub fn total_words_copied(&self) -> usize {
        self.total_words_copied
    }

    /// Sorted by similarity, highest first.
    pub fn sentence_matches(&self) -> &[SentenceMatch] {
        &self.sentence_matches
    }

    /// Sorted by similarity, highest first.
    pub fn section_matches(&self) -> &[SectionMatch] {
        &self.section_matches
    }

    /// Sorted by match percentage, highest first.
    pub fn source_matches(&self) -> &[SourceMatch] {
        &self.source_matches
    }

    pub fn is_exact_duplicate(&self) -> bool {
        self.is_exact_duplicate
    }

    pub fn is_different_technology(&self) -> bool {
        self.is_different_technology
    }

    /// True when some input exceeded a token or sentence bound.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    pub fn diagnostics(&self) -> &[EntryDiagnostic] {
        &self.diagnostics
    }

    pub fn mode(&self) -> DetectionMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_selects_detectors() {
        assert!(DetectionMode::Hybrid.runs_lexical());
        assert!(DetectionMode::Hybrid.runs_structural());
        assert!(!DetectionMode::Lexical.runs_structural());
        assert!(!DetectionMode::Structural.runs_lexical());
        assert_eq!(DetectionMode::default(), DetectionMode::Hybrid);
    }

    #[test]
    fn empty_report_is_all_zero() {
        let report = PlagiarismReport::empty(DetectionMode::Hybrid);
        assert_eq!(report.overall_score(), 0);
        assert_eq!(report.originality_score(), 100);
        assert_eq!(report.total_words(), 0);
        assert!(report.source_matches().is_empty());
        assert!(!report.is_exact_duplicate());
        assert_eq!(report.level(), SimilarityLevel::Unique);
    }

    #[test]
    fn entry_title_falls_back_to_metadata() {
        let entry = CorpusEntry::new("p-1", "  ", "text")
            .with_metadata(DocumentMetadata::new().with_title("Metadata Title"));
        assert_eq!(entry.effective_title(), Some("Metadata Title"));
        let entry = CorpusEntry::new("p-2", "Own Title", "text");
        assert_eq!(entry.effective_title(), Some("Own Title"));
    }

    #[test]
    fn document_deserializes_without_metadata() {
        let doc: Document = serde_json::from_str(r#"{"text": "hello"}"#).unwrap();
        assert_eq!(doc, Document::new("hello"));
        let meta: DocumentMetadata =
            serde_json::from_str(r##"{"title": "T", "tags": ["#ai"]}"##).unwrap();
        assert_eq!(meta.tags, vec!["#ai".to_string()]);
        assert_eq!(meta.methodology, None);
    }

    #[test]
    fn enums_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&MatchType::Paraphrase).unwrap(), "\"paraphrase\"");
        assert_eq!(serde_json::to_string(&DetectionMode::Lexical).unwrap(), "\"lexical\"");
        assert_eq!(serde_json::to_string(&SimilarityLevel::High).unwrap(), "\"high\"");
    }
}
