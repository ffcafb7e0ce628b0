//! Score reconciliation.
//!
//! Pure functions from detector signals to per-entry verdicts and the
//! overall score. Structural flags override lexical scores: a different
//! technology caps the score whatever the lexical evidence says, while an
//! exact duplicate from either detector forces the overall score to 100.

use perceptual::clamp_score;
use structural::{Section, SectionScores};

use crate::config::{DivergenceWeights, Thresholds};
use crate::detector::LexicalSignal;

/// Section scores of one entry and the flags derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuralSignal {
    pub scores: SectionScores,
    pub weighted_average: f64,
    /// Weighted average, or the capped divergence score when technologies
    /// or abstract diverge.
    pub effective_score: f64,
    pub is_different_technology: bool,
    pub is_exact_duplicate: bool,
}

/// Combined view of one evaluated entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryVerdict {
    pub combined: f64,
    pub included: bool,
    pub is_different_technology: bool,
    pub is_exact_duplicate: bool,
}

/// Apply the structural rules to a set of section scores.
pub fn assess_sections(
    scores: SectionScores,
    thresholds: &Thresholds,
    divergence: &DivergenceWeights,
) -> StructuralSignal {
    let title = scores.similarity(Section::Title);
    let technologies = scores.similarity(Section::Technologies);
    let weighted_average = scores.weighted_average();

    StructuralSignal {
        effective_score: effective_score(&scores, thresholds, divergence),
        is_different_technology: technologies < thresholds.different_tech_max_technologies
            && title > thresholds.different_tech_min_title,
        is_exact_duplicate: weighted_average >= thresholds.duplicate_min_weighted
            && technologies >= thresholds.duplicate_min_technologies,
        weighted_average,
        scores,
    }
}

/// Similarity after the divergence caps.
///
/// Diverging technologies are replaced by the abstract in the capped score;
/// a diverging abstract is replaced by the technologies.
pub fn effective_score(
    scores: &SectionScores,
    thresholds: &Thresholds,
    divergence: &DivergenceWeights,
) -> f64 {
    let title = scores.similarity(Section::Title);
    let abstract_ = scores.similarity(Section::Abstract);
    let technologies = scores.similarity(Section::Technologies);
    let keywords = scores.similarity(Section::Keywords);
    let methodology = scores.similarity(Section::Methodology);

    let capped = |substitute: f64| {
        let score = divergence.title * title
            + divergence.abstract_or_technologies * substitute
            + divergence.keywords * keywords
            + divergence.methodology * methodology;
        clamp_score(score.min(thresholds.divergence_cap))
    };

    if technologies < thresholds.divergence_floor {
        capped(abstract_)
    } else if abstract_ < thresholds.divergence_floor {
        capped(technologies)
    } else {
        scores.weighted_average()
    }
}

/// Reconcile the signals of one entry. At least one signal must be present
/// for the verdict to carry a non-zero score.
pub fn combine_entry(
    structural: Option<&StructuralSignal>,
    lexical: Option<&LexicalSignal>,
    thresholds: &Thresholds,
) -> EntryVerdict {
    let structural_score = structural.map_or(0.0, |s| s.effective_score);
    let lexical_score = lexical.map_or(0.0, |l| l.score);
    let is_different_technology = structural.is_some_and(|s| s.is_different_technology);
    let is_exact_duplicate = structural.is_some_and(|s| s.is_exact_duplicate)
        || lexical.is_some_and(|l| l.is_exact_duplicate);

    let mut combined = structural_score.max(lexical_score);
    if is_different_technology {
        combined = combined.min(thresholds.different_tech_cap);
    }
    let combined = clamp_score(combined);

    EntryVerdict {
        combined,
        included: combined > thresholds.inclusion,
        is_different_technology,
        is_exact_duplicate,
    }
}

/// Overall score across all evaluated entries.
pub fn overall_score(verdicts: &[EntryVerdict], thresholds: &Thresholds) -> f64 {
    let mut overall = verdicts
        .iter()
        .filter(|v| v.included)
        .map(|v| v.combined)
        .fold(0.0_f64, f64::max);

    if verdicts.iter().any(|v| v.is_different_technology) {
        overall = overall.min(thresholds.different_tech_cap);
    }
    if verdicts.iter().any(|v| v.is_exact_duplicate) {
        overall = 100.0;
    }
    clamp_score(overall)
}
