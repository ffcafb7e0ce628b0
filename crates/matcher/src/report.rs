//! Report assembly from evaluated entries.

use std::cmp::Ordering;

use perceptual::clamp_score;

use crate::combine::{overall_score, EntryVerdict, StructuralSignal};
use crate::config::Thresholds;
use crate::detector::LexicalSignal;
use crate::types::{
    DetectionMode, EntryDiagnostic, LexicalSummary, PlagiarismReport, SectionMatch,
    SentenceMatch, SourceMatch,
};

/// Everything learned about one corpus entry during a check.
#[derive(Debug, Clone)]
pub(crate) struct EntryOutcome {
    pub id: String,
    pub title: String,
    pub structural: Option<StructuralSignal>,
    pub lexical: Option<LexicalSignal>,
    pub verdict: EntryVerdict,
}

impl EntryOutcome {
    pub fn truncated(&self) -> bool {
        self.lexical.as_ref().is_some_and(|l| l.truncated)
    }
}

/// Inputs of [`build_report`] that do not depend on any entry.
pub(crate) struct ReportContext<'a> {
    pub mode: DetectionMode,
    pub thresholds: &'a Thresholds,
    pub total_words: usize,
    pub upload_truncated: bool,
}

pub(crate) fn build_report(
    ctx: &ReportContext<'_>,
    outcomes: &[EntryOutcome],
    diagnostics: Vec<EntryDiagnostic>,
) -> PlagiarismReport {
    let thresholds = ctx.thresholds;
    let verdicts: Vec<EntryVerdict> = outcomes.iter().map(|o| o.verdict).collect();
    let overall = round_score(overall_score(&verdicts, thresholds));

    let mut source_matches: Vec<SourceMatch> = outcomes
        .iter()
        .filter(|o| o.verdict.included)
        .map(|o| source_match(o, ctx.total_words))
        .collect();
    source_matches.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));

    let mut sentence_matches: Vec<SentenceMatch> = outcomes
        .iter()
        .filter_map(|o| o.lexical.as_ref().map(|l| (o, l)))
        .flat_map(|(o, lexical)| {
            lexical.alignment.matches.iter().map(move |m| SentenceMatch {
                uploaded_sentence: m.uploaded.clone(),
                source_sentence: m.source.clone(),
                source_id: o.id.clone(),
                source_title: o.title.clone(),
                similarity: m.similarity,
                line_number: m.uploaded_line,
                match_type: thresholds.sentence_match_type(m.similarity),
            })
        })
        .collect();
    sentence_matches.sort_by(|a, b| {
        descending(a.similarity, b.similarity).then(a.line_number.cmp(&b.line_number))
    });

    let mut section_matches: Vec<SectionMatch> = outcomes
        .iter()
        .filter(|o| o.verdict.included)
        .filter_map(|o| o.structural.as_ref().map(|s| (o, s)))
        .flat_map(|(o, structural)| {
            structural
                .scores
                .iter()
                .filter(|score| score.similarity >= thresholds.section_match_min)
                .map(move |score| SectionMatch {
                    section: score.section,
                    source_id: o.id.clone(),
                    source_title: o.title.clone(),
                    similarity: score.similarity,
                    match_type: thresholds.section_match_type(score.similarity),
                })
        })
        .collect();
    section_matches.sort_by(|a, b| descending(a.similarity, b.similarity));

    let total_words_copied =
        (f64::from(overall) / 100.0 * ctx.total_words as f64).round() as usize;

    PlagiarismReport {
        overall_score: overall,
        originality_score: 100 - overall,
        level: thresholds.level(f64::from(overall)),
        total_words: ctx.total_words,
        total_words_copied,
        sentence_matches,
        section_matches,
        source_matches,
        is_exact_duplicate: verdicts.iter().any(|v| v.is_exact_duplicate),
        is_different_technology: verdicts.iter().any(|v| v.is_different_technology),
        truncated: ctx.upload_truncated || outcomes.iter().any(EntryOutcome::truncated),
        diagnostics,
        mode: ctx.mode,
    }
}

fn source_match(outcome: &EntryOutcome, total_words: usize) -> SourceMatch {
    let score = outcome.verdict.combined;
    let (estimated_words_copied, estimated_sentences_matched) = match &outcome.lexical {
        Some(lexical) => (
            lexical.alignment.covered_words.min(total_words),
            lexical.alignment.matches.len(),
        ),
        None => (
            (total_words as f64 * score / 100.0).round() as usize,
            (score / 10.0).round() as usize,
        ),
    };

    SourceMatch {
        id: outcome.id.clone(),
        title: outcome.title.clone(),
        match_percentage: round_score(score),
        estimated_words_copied,
        estimated_sentences_matched,
        section_scores: outcome
            .structural
            .as_ref()
            .map(|s| s.scores.as_slice().to_vec())
            .unwrap_or_default(),
        lexical: outcome.lexical.as_ref().map(|l| LexicalSummary {
            fingerprint_jaccard: l.fingerprint_jaccard,
            sentence_match_ratio: l.alignment.match_ratio(),
            matched_sentences: l.alignment.matches.len(),
        }),
        is_exact_duplicate: outcome.verdict.is_exact_duplicate,
        is_different_technology: outcome.verdict.is_different_technology,
    }
}

fn round_score(score: f64) -> u8 {
    clamp_score(score).round() as u8
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
