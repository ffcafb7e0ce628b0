use std::time::Instant;

use canonical::{Canonicalizer, StopwordSet};
use rayon::prelude::*;
use structural::{SectionProfile, Vocabulary};
use tracing::{debug, info, warn, Level};

use crate::combine::combine_entry;
use crate::config::{ConfigError, EngineConfig};
use crate::detector::{
    Detector, LexicalAnalysis, LexicalDetector, PreparedDocument, StructuralDetector,
};
use crate::metrics::metrics_recorder;
use crate::report::{build_report, EntryOutcome, ReportContext};
use crate::types::{CorpusEntry, Document, EntryDiagnostic, EntryError, PlagiarismReport};

/// Upload state shared read-only by every entry evaluation.
struct UploadAnalysis {
    lexical: Option<LexicalAnalysis>,
    structural: Option<SectionProfile>,
}

/// Originality checking engine.
///
/// Holds only validated, read-only configuration, so one engine can serve
/// concurrent checks from many threads.
#[derive(Debug, Clone)]
pub struct Engine {
    cfg: EngineConfig,
    canonicalizer: Canonicalizer,
    lexical: LexicalDetector,
    structural: StructuralDetector,
}

impl Engine {
    /// Build an engine with the bundled vocabulary and English stopwords.
    pub fn new(cfg: EngineConfig) -> Result<Self, ConfigError> {
        let vocabulary = Vocabulary::builtin()?;
        let stopwords = StopwordSet::english()?;
        Self::with_vocabulary(cfg, vocabulary, stopwords)
    }

    /// Build an engine with caller-supplied vocabulary and stopwords.
    pub fn with_vocabulary(
        cfg: EngineConfig,
        vocabulary: Vocabulary,
        stopwords: StopwordSet,
    ) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let canonicalizer = Canonicalizer::new(cfg.canonical.clone())?;
        let lexical = LexicalDetector::new(
            cfg.canonical.clone(),
            stopwords,
            cfg.perceptual.clone(),
            cfg.align.clone(),
            cfg.thresholds.clone(),
        )?;
        let structural = StructuralDetector::new(
            vocabulary,
            cfg.canonical.clone(),
            cfg.structural.clone(),
            cfg.thresholds.clone(),
            cfg.divergence,
        )?;
        Ok(Self {
            cfg,
            canonicalizer,
            lexical,
            structural,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        self.structural.vocabulary()
    }

    /// Check `document` against every entry of `corpus`.
    ///
    /// Never fails: entries that cannot be evaluated are skipped and listed
    /// in the report diagnostics.
    pub fn check(&self, document: &Document, corpus: &[CorpusEntry]) -> PlagiarismReport {
        let start = Instant::now();
        let mode = self.cfg.mode;
        let span = tracing::span!(
            Level::INFO,
            "matcher.check",
            mode = mode.as_str(),
            entries = corpus.len()
        );
        let _guard = span.enter();

        let prepared = PreparedDocument::new(document, None, &self.canonicalizer);
        if prepared.canonical.is_empty() {
            info!(elapsed_micros = start.elapsed().as_micros(), "check_empty_upload");
            return PlagiarismReport::empty(mode);
        }
        let total_words = prepared.canonical.word_count();

        let upload = UploadAnalysis {
            lexical: mode
                .runs_lexical()
                .then(|| self.lexical.analyze(&prepared)),
            structural: mode
                .runs_structural()
                .then(|| self.structural.analyze(&prepared)),
        };
        let upload_truncated = upload
            .lexical
            .as_ref()
            .is_some_and(|analysis| analysis.fingerprint.truncated);

        let results: Vec<Result<EntryOutcome, EntryError>> = if self.cfg.use_parallel {
            corpus
                .par_iter()
                .map(|entry| self.evaluate(entry, &upload))
                .collect()
        } else {
            corpus
                .iter()
                .map(|entry| self.evaluate(entry, &upload))
                .collect()
        };

        let mut outcomes = Vec::with_capacity(results.len());
        let mut diagnostics = Vec::new();
        for (entry_index, (entry, result)) in corpus.iter().zip(results).enumerate() {
            match result {
                Ok(outcome) => {
                    debug!(
                        entry_id = %outcome.id,
                        combined = outcome.verdict.combined,
                        included = outcome.verdict.included,
                        "entry_scored"
                    );
                    outcomes.push(outcome);
                }
                Err(err) => {
                    warn!(entry_id = %entry.id, entry_index, error = %err, "entry_skipped");
                    diagnostics.push(EntryDiagnostic {
                        entry_id: entry.id.clone(),
                        entry_index,
                        message: err.to_string(),
                    });
                }
            }
        }

        let ctx = ReportContext {
            mode,
            thresholds: &self.cfg.thresholds,
            total_words,
            upload_truncated,
        };
        let entries_skipped = diagnostics.len();
        let report = build_report(&ctx, &outcomes, diagnostics);

        if report.truncated() {
            warn!(
                max_tokens = self.cfg.perceptual.max_tokens,
                max_sentences = self.cfg.align.max_sentences,
                "check_truncated"
            );
        }

        let latency = start.elapsed();
        info!(
            overall_score = report.overall_score(),
            sources = report.source_matches().len(),
            entries_skipped,
            elapsed_micros = latency.as_micros(),
            "check_success"
        );

        if let Some(recorder) = metrics_recorder() {
            recorder.record_check(mode, latency, outcomes.len(), entries_skipped);
        }

        report
    }

    fn evaluate(
        &self,
        entry: &CorpusEntry,
        upload: &UploadAnalysis,
    ) -> Result<EntryOutcome, EntryError> {
        let prepared = prepare_entry(entry, &self.canonicalizer)?;
        let title = prepared.title;

        let structural = upload.structural.as_ref().map(|uploaded| {
            let source = self.structural.analyze(&prepared);
            self.structural.compare(uploaded, &source)
        });
        let lexical = upload.lexical.as_ref().map(|uploaded| {
            let source = self.lexical.analyze(&prepared);
            self.lexical.compare(uploaded, &source)
        });
        let verdict = combine_entry(structural.as_ref(), lexical.as_ref(), &self.cfg.thresholds);

        Ok(EntryOutcome {
            id: entry.id.clone(),
            title: title.unwrap_or_default().to_string(),
            structural,
            lexical,
            verdict,
        })
    }
}

/// Canonicalize an entry once, rejecting it when it has nothing to compare.
fn prepare_entry<'a>(
    entry: &'a CorpusEntry,
    canonicalizer: &Canonicalizer,
) -> Result<PreparedDocument<'a>, EntryError> {
    if entry.id.trim().is_empty() {
        return Err(EntryError::EmptyId);
    }
    let prepared = PreparedDocument::new(&entry.document, entry.effective_title(), canonicalizer);
    let title_empty = prepared
        .title
        .map_or(true, |title| canonicalizer.normalize(title).is_empty());
    if title_empty && prepared.canonical.is_empty() {
        return Err(EntryError::EmptyContent {
            id: entry.id.clone(),
        });
    }
    Ok(prepared)
}
