//! Detection strategies.
//!
//! A [`Detector`] reduces a document to an analysis once and compares two
//! analyses cheaply. The engine canonicalizes every document a single time
//! into a [`PreparedDocument`], analyzes the upload once and then compares it
//! against every corpus entry.

use canonical::{
    normalize, tokenize_sentences, tokenize_words, CanonicalizeConfig, CanonicalizedDocument,
    Canonicalizer, StopwordSet,
};
use perceptual::{
    clamp_score, AlignConfig, AlignableSentence, Alignment, Fingerprinter, LexicalFingerprint,
    PerceptualConfig, SentenceAligner,
};
use structural::{
    SectionComparator, SectionExtractor, SectionInput, SectionProfile, StructuralConfig,
    Vocabulary,
};

use crate::combine::{assess_sections, StructuralSignal};
use crate::config::{ConfigError, DivergenceWeights, Thresholds};
use crate::types::Document;

/// A document together with its canonical form.
///
/// The canonicalizer must use the same config the detectors were built with.
#[derive(Debug, Clone)]
pub struct PreparedDocument<'a> {
    pub document: &'a Document,
    /// Overrides the metadata title when set.
    pub title: Option<&'a str>,
    pub canonical: CanonicalizedDocument,
}

impl<'a> PreparedDocument<'a> {
    pub fn new(
        document: &'a Document,
        title: Option<&'a str>,
        canonicalizer: &Canonicalizer,
    ) -> Self {
        Self {
            document,
            title,
            canonical: canonicalizer.canonicalize(&document.text),
        }
    }

    /// The override title, else the metadata title.
    pub fn title(&self) -> Option<&'a str> {
        self.title.or_else(|| self.document.title())
    }
}

/// Shared interface of the lexical and structural strategies.
pub trait Detector: Send + Sync {
    /// Per-document state, computed once.
    type Analysis: Send + Sync;
    /// Evidence produced by comparing two analyses.
    type Signal: Send;

    fn analyze(&self, prepared: &PreparedDocument<'_>) -> Self::Analysis;

    fn compare(&self, uploaded: &Self::Analysis, source: &Self::Analysis) -> Self::Signal;
}

/// Lexical view of one document.
#[derive(Debug, Clone)]
pub struct LexicalAnalysis {
    /// Identity hash of the normalized text; `None` when it is empty.
    pub identity: Option<String>,
    pub fingerprint: LexicalFingerprint,
    pub sentences: Vec<AlignableSentence>,
}

/// Lexical evidence for one entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LexicalSignal {
    pub fingerprint_jaccard: f64,
    pub alignment: Alignment,
    /// `max(fingerprint_jaccard, sentence match ratio)`.
    pub score: f64,
    pub is_exact_duplicate: bool,
    /// Either fingerprint or the alignment hit its bound.
    pub truncated: bool,
}

/// Shingle fingerprints plus sentence alignment.
#[derive(Debug, Clone)]
pub struct LexicalDetector {
    canonical: CanonicalizeConfig,
    stopwords: StopwordSet,
    fingerprinter: Fingerprinter,
    aligner: SentenceAligner,
    thresholds: Thresholds,
}

impl LexicalDetector {
    pub fn new(
        canonical: CanonicalizeConfig,
        stopwords: StopwordSet,
        perceptual: PerceptualConfig,
        align: AlignConfig,
        thresholds: Thresholds,
    ) -> Result<Self, ConfigError> {
        canonical.validate()?;
        thresholds.validate()?;
        Ok(Self {
            canonical,
            stopwords,
            fingerprinter: Fingerprinter::new(perceptual)?,
            aligner: SentenceAligner::new(align)?,
            thresholds,
        })
    }

    /// Stopword-filtered copy of `words`.
    fn content_words<S: AsRef<str>>(&self, words: &[S]) -> Vec<String> {
        self.stopwords
            .remove_stopwords(words, &self.canonical)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

impl Detector for LexicalDetector {
    type Analysis = LexicalAnalysis;
    type Signal = LexicalSignal;

    fn analyze(&self, prepared: &PreparedDocument<'_>) -> LexicalAnalysis {
        let canonical = &prepared.canonical;
        let identity = (!canonical.is_empty()).then(|| canonical.sha256_hex.clone());
        let fingerprint = self.fingerprinter.fingerprint(&self.content_words(&canonical.words));

        let sentences = tokenize_sentences(&prepared.document.text, &self.canonical)
            .into_iter()
            .map(|sentence| {
                let normalized = normalize(&sentence.text, &self.canonical);
                let words = self.content_words(&tokenize_words(&normalized, &self.canonical));
                AlignableSentence::new(sentence.ordinal, sentence.text, words)
            })
            .collect();

        LexicalAnalysis {
            identity,
            fingerprint,
            sentences,
        }
    }

    fn compare(&self, uploaded: &LexicalAnalysis, source: &LexicalAnalysis) -> LexicalSignal {
        let t = &self.thresholds;
        let fingerprint_jaccard = uploaded.fingerprint.hashes.jaccard(&source.fingerprint.hashes);
        let alignment = self.aligner.align(&uploaded.sentences, &source.sentences);

        let identical = matches!(
            (&uploaded.identity, &source.identity),
            (Some(a), Some(b)) if a == b
        );
        let is_exact_duplicate = identical
            || fingerprint_jaccard >= t.lexical_duplicate_jaccard
            || alignment.share_at_least(t.lexical_duplicate_sentence_similarity)
                >= t.lexical_duplicate_sentence_share;

        let truncated =
            uploaded.fingerprint.truncated || source.fingerprint.truncated || alignment.truncated;

        LexicalSignal {
            score: clamp_score(fingerprint_jaccard.max(alignment.match_ratio())),
            fingerprint_jaccard,
            alignment,
            is_exact_duplicate,
            truncated,
        }
    }
}

/// Section-weighted comparison of extracted profiles.
#[derive(Debug, Clone)]
pub struct StructuralDetector {
    extractor: SectionExtractor,
    comparator: SectionComparator,
    thresholds: Thresholds,
    divergence: DivergenceWeights,
}

impl StructuralDetector {
    pub fn new(
        vocabulary: Vocabulary,
        canonical: CanonicalizeConfig,
        structural: StructuralConfig,
        thresholds: Thresholds,
        divergence: DivergenceWeights,
    ) -> Result<Self, ConfigError> {
        thresholds.validate()?;
        divergence.validate()?;
        let comparator = SectionComparator::new(&structural)?;
        Ok(Self {
            extractor: SectionExtractor::new(vocabulary, canonical, structural)?,
            comparator,
            thresholds,
            divergence,
        })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        self.extractor.vocabulary()
    }
}

impl Detector for StructuralDetector {
    type Analysis = SectionProfile;
    type Signal = StructuralSignal;

    fn analyze(&self, prepared: &PreparedDocument<'_>) -> SectionProfile {
        let document = prepared.document;
        let metadata = document.metadata.as_ref();
        let input = SectionInput {
            title: prepared.title(),
            text: &document.text,
            canonical_text: Some(&prepared.canonical.canonical_text),
            description: metadata.and_then(|m| m.description.as_deref()),
            tags: metadata.map(|m| m.tags.as_slice()).unwrap_or_default(),
            methodology: metadata.and_then(|m| m.methodology.as_deref()),
        };
        self.extractor.extract(&input)
    }

    fn compare(&self, uploaded: &SectionProfile, source: &SectionProfile) -> StructuralSignal {
        let scores = self.comparator.compare(uploaded, source);
        assess_sections(scores, &self.thresholds, &self.divergence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DocumentMetadata;

    fn lexical() -> LexicalDetector {
        LexicalDetector::new(
            CanonicalizeConfig::default(),
            StopwordSet::english().unwrap(),
            PerceptualConfig::default(),
            AlignConfig::default(),
            Thresholds::default(),
        )
        .unwrap()
    }

    fn analyze<D: Detector>(
        detector: &D,
        document: &Document,
        title: Option<&str>,
    ) -> D::Analysis {
        let canonicalizer = Canonicalizer::new(CanonicalizeConfig::default()).unwrap();
        detector.analyze(&PreparedDocument::new(document, title, &canonicalizer))
    }

    fn structural() -> StructuralDetector {
        StructuralDetector::new(
            Vocabulary::builtin().unwrap(),
            CanonicalizeConfig::default(),
            StructuralConfig::default(),
            Thresholds::default(),
            DivergenceWeights::default(),
        )
        .unwrap()
    }

    const TEXT: &str = "The system detects crop disease from leaf images. \
        A convolutional network is trained on labelled field photographs. \
        Farmers receive treatment advice through a mobile application.";

    #[test]
    fn identical_text_is_lexical_duplicate() {
        let detector = lexical();
        let a = analyze(&detector, &Document::new(TEXT), None);
        let b = analyze(&detector, &Document::new(TEXT.to_uppercase()), None);
        let signal = detector.compare(&a, &b);
        assert!(signal.is_exact_duplicate);
        assert_eq!(signal.fingerprint_jaccard, 100.0);
        assert_eq!(signal.score, 100.0);
        assert_eq!(signal.alignment.matches.len(), 3);
    }

    #[test]
    fn unrelated_text_scores_zero() {
        let detector = lexical();
        let a = analyze(&detector, &Document::new(TEXT), None);
        let b = analyze(
            &detector,
            &Document::new("Quarterly budgets were reconciled by the finance office yesterday."),
            None,
        );
        let signal = detector.compare(&a, &b);
        assert_eq!(signal.fingerprint_jaccard, 0.0);
        assert!(signal.alignment.matches.is_empty());
        assert_eq!(signal.score, 0.0);
        assert!(!signal.is_exact_duplicate);
    }

    #[test]
    fn one_copied_sentence_is_partial() {
        let detector = lexical();
        let upload = analyze(&detector, &Document::new(TEXT), None);
        let source = analyze(
            &detector,
            &Document::new(
                "Farmers receive treatment advice through a mobile application. \
                 Weather stations report rainfall every hour across the valley.",
            ),
            None,
        );
        let signal = detector.compare(&upload, &source);
        assert_eq!(signal.alignment.matches.len(), 1);
        assert_eq!(signal.alignment.matches[0].uploaded_line, 3);
        assert_eq!(signal.alignment.matches[0].similarity, 100.0);
        assert!(!signal.is_exact_duplicate);
        assert!(signal.score >= signal.alignment.match_ratio());
    }

    #[test]
    fn empty_documents_never_match() {
        let detector = lexical();
        let a = analyze(&detector, &Document::new("   "), None);
        let b = analyze(&detector, &Document::new(""), None);
        assert!(a.identity.is_none());
        let signal = detector.compare(&a, &b);
        assert!(!signal.is_exact_duplicate);
        assert_eq!(signal.score, 0.0);
    }

    #[test]
    fn truncated_fingerprint_is_reported() {
        let detector = LexicalDetector::new(
            CanonicalizeConfig::default(),
            StopwordSet::english().unwrap(),
            PerceptualConfig::new().with_max_tokens(4),
            AlignConfig::default(),
            Thresholds::default(),
        )
        .unwrap();
        let a = analyze(&detector, &Document::new(TEXT), None);
        assert!(a.fingerprint.truncated);
        assert!(detector.compare(&a, &a).truncated);
    }

    #[test]
    fn structural_reads_metadata() {
        let detector = structural();
        let doc = Document::new("A Flask service stores readings in PostgreSQL.").with_metadata(
            DocumentMetadata::new()
                .with_title("Sensor Dashboard")
                .with_tags(["#IoT"])
                .with_methodology("Agile delivery"),
        );
        let profile = analyze(&detector, &doc, None);
        assert_eq!(profile.title, "Sensor Dashboard");
        assert!(profile.keywords.contains("iot"));
        assert!(profile.technologies.contains("flask"));
        assert!(profile.methodology.contains("agile"));

        let overridden = analyze(&detector, &doc, Some("Entry Title"));
        assert_eq!(overridden.title, "Entry Title");
    }

    #[test]
    fn identity_comes_from_canonical_hash() {
        let detector = lexical();
        let canonicalizer = Canonicalizer::new(CanonicalizeConfig::default()).unwrap();
        let doc = Document::new(TEXT);
        let prepared = PreparedDocument::new(&doc, None, &canonicalizer);
        let analysis = detector.analyze(&prepared);
        assert_eq!(analysis.identity.as_deref(), Some(prepared.canonical.sha256_hex.as_str()));
    }

    #[test]
    fn prepared_title_prefers_override() {
        let canonicalizer = Canonicalizer::new(CanonicalizeConfig::default()).unwrap();
        let doc = Document::new(TEXT).with_metadata(DocumentMetadata::new().with_title("Meta"));
        assert_eq!(PreparedDocument::new(&doc, None, &canonicalizer).title(), Some("Meta"));
        assert_eq!(
            PreparedDocument::new(&doc, Some("Entry"), &canonicalizer).title(),
            Some("Entry")
        );
    }

    #[test]
    fn structural_identical_profiles_are_duplicates() {
        let detector = structural();
        let doc = Document::new("A Flask service stores readings in PostgreSQL using a survey.")
            .with_metadata(
                DocumentMetadata::new()
                    .with_title("Sensor Dashboard")
                    .with_tags(["iot"]),
            );
        let profile = analyze(&detector, &doc, None);
        let signal = detector.compare(&profile, &profile);
        assert!(signal.is_exact_duplicate);
        assert_eq!(signal.effective_score, 100.0);
    }
}
