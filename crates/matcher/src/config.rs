//! Engine configuration: detector settings, score thresholds and divergence
//! weights, validated together before an [`Engine`](crate::Engine) is built.

use canonical::{CanonicalError, CanonicalizeConfig};
use perceptual::{AlignConfig, PerceptualConfig, PerceptualError};
use serde::{Deserialize, Serialize};
use structural::{StructuralConfig, StructuralError};
use thiserror::Error;

use crate::types::{DetectionMode, MatchType, SimilarityLevel};

/// Errors raised while building an engine.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Canonical(#[from] CanonicalError),
    #[error(transparent)]
    Perceptual(#[from] PerceptualError),
    #[error(transparent)]
    Structural(#[from] StructuralError),
}

/// Every score threshold used when combining and reporting, on a 0-100 scale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Thresholds {
    /// Entries whose combined score is not above this are left out.
    pub inclusion: f64,
    /// Technologies similarity below which an entry may be a different technology.
    pub different_tech_max_technologies: f64,
    /// Title similarity above which an entry may be a different technology.
    pub different_tech_min_title: f64,
    pub duplicate_min_weighted: f64,
    pub duplicate_min_technologies: f64,
    /// Technologies or abstract similarity below this triggers the divergence cap.
    pub divergence_floor: f64,
    pub divergence_cap: f64,
    /// Cap on the overall score once any entry is a different technology.
    pub different_tech_cap: f64,
    pub lexical_duplicate_jaccard: f64,
    pub lexical_duplicate_sentence_similarity: f64,
    /// Share of uploaded sentences that must clear
    /// `lexical_duplicate_sentence_similarity`.
    pub lexical_duplicate_sentence_share: f64,
    pub sentence_exact: f64,
    pub sentence_paraphrase: f64,
    pub section_match_min: f64,
    pub section_exact: f64,
    pub section_paraphrase: f64,
    pub level_duplicate: f64,
    pub level_high: f64,
    pub level_moderate: f64,
    pub level_low: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            inclusion: 20.0,
            different_tech_max_technologies: 30.0,
            different_tech_min_title: 50.0,
            duplicate_min_weighted: 90.0,
            duplicate_min_technologies: 80.0,
            divergence_floor: 30.0,
            divergence_cap: 40.0,
            different_tech_cap: 40.0,
            lexical_duplicate_jaccard: 95.0,
            lexical_duplicate_sentence_similarity: 90.0,
            lexical_duplicate_sentence_share: 95.0,
            sentence_exact: 95.0,
            sentence_paraphrase: 70.0,
            section_match_min: 60.0,
            section_exact: 90.0,
            section_paraphrase: 70.0,
            level_duplicate: 95.0,
            level_high: 70.0,
            level_moderate: 40.0,
            level_low: 20.0,
        }
    }
}

impl Thresholds {
    pub fn sentence_match_type(&self, similarity: f64) -> MatchType {
        classify(similarity, self.sentence_exact, self.sentence_paraphrase)
    }

    pub fn section_match_type(&self, similarity: f64) -> MatchType {
        classify(similarity, self.section_exact, self.section_paraphrase)
    }

    pub fn level(&self, overall: f64) -> SimilarityLevel {
        if overall >= self.level_duplicate {
            SimilarityLevel::Duplicate
        } else if overall >= self.level_high {
            SimilarityLevel::High
        } else if overall >= self.level_moderate {
            SimilarityLevel::Moderate
        } else if overall >= self.level_low {
            SimilarityLevel::Low
        } else {
            SimilarityLevel::Unique
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let named = [
            ("inclusion", self.inclusion),
            ("different_tech_max_technologies", self.different_tech_max_technologies),
            ("different_tech_min_title", self.different_tech_min_title),
            ("duplicate_min_weighted", self.duplicate_min_weighted),
            ("duplicate_min_technologies", self.duplicate_min_technologies),
            ("divergence_floor", self.divergence_floor),
            ("divergence_cap", self.divergence_cap),
            ("different_tech_cap", self.different_tech_cap),
            ("lexical_duplicate_jaccard", self.lexical_duplicate_jaccard),
            (
                "lexical_duplicate_sentence_similarity",
                self.lexical_duplicate_sentence_similarity,
            ),
            ("lexical_duplicate_sentence_share", self.lexical_duplicate_sentence_share),
            ("sentence_exact", self.sentence_exact),
            ("sentence_paraphrase", self.sentence_paraphrase),
            ("section_match_min", self.section_match_min),
            ("section_exact", self.section_exact),
            ("section_paraphrase", self.section_paraphrase),
            ("level_duplicate", self.level_duplicate),
            ("level_high", self.level_high),
            ("level_moderate", self.level_moderate),
            ("level_low", self.level_low),
        ];
        for (name, value) in named {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::InvalidConfig(format!(
                    "threshold {name} must be within [0, 100] (got {value})"
                )));
            }
        }

        let ordered = [
            ("sentence_paraphrase", self.sentence_paraphrase, "sentence_exact", self.sentence_exact),
            ("section_paraphrase", self.section_paraphrase, "section_exact", self.section_exact),
            ("level_low", self.level_low, "level_moderate", self.level_moderate),
            ("level_moderate", self.level_moderate, "level_high", self.level_high),
            ("level_high", self.level_high, "level_duplicate", self.level_duplicate),
        ];
        for (low_name, low, high_name, high) in ordered {
            if low > high {
                return Err(ConfigError::InvalidConfig(format!(
                    "threshold {low_name} ({low}) must not exceed {high_name} ({high})"
                )));
            }
        }
        Ok(())
    }
}

fn classify(similarity: f64, exact: f64, paraphrase: f64) -> MatchType {
    if similarity >= exact {
        MatchType::Exact
    } else if similarity >= paraphrase {
        MatchType::Paraphrase
    } else {
        MatchType::Partial
    }
}

/// Weights of the capped score used when an entry diverges from the upload.
///
/// The second weight applies to abstract similarity when technologies
/// diverge, and to technologies similarity when the abstract diverges.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DivergenceWeights {
    pub title: f64,
    pub abstract_or_technologies: f64,
    pub keywords: f64,
    pub methodology: f64,
}

impl Default for DivergenceWeights {
    fn default() -> Self {
        Self {
            title: 0.3,
            abstract_or_technologies: 0.3,
            keywords: 0.2,
            methodology: 0.2,
        }
    }
}

impl DivergenceWeights {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = [
            self.title,
            self.abstract_or_technologies,
            self.keywords,
            self.methodology,
        ];
        if weights.iter().any(|w| !(0.0..=1.0).contains(w)) {
            return Err(ConfigError::InvalidConfig(
                "divergence weights must be within [0, 1]".into(),
            ));
        }
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > 1e-9 {
            return Err(ConfigError::InvalidConfig(format!(
                "divergence weights must sum to 1.0 (got {sum})"
            )));
        }
        Ok(())
    }
}

/// Full configuration of an [`Engine`](crate::Engine).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Configuration schema version; must be >= 1.
    pub version: u32,
    pub mode: DetectionMode,
    /// Evaluate corpus entries on the rayon thread pool.
    pub use_parallel: bool,
    pub canonical: CanonicalizeConfig,
    pub perceptual: PerceptualConfig,
    pub align: AlignConfig,
    pub structural: StructuralConfig,
    pub thresholds: Thresholds,
    pub divergence: DivergenceWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            version: 1,
            mode: DetectionMode::default(),
            use_parallel: false,
            canonical: CanonicalizeConfig::default(),
            perceptual: PerceptualConfig::default(),
            align: AlignConfig::default(),
            structural: StructuralConfig::default(),
            thresholds: Thresholds::default(),
            divergence: DivergenceWeights::default(),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: DetectionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    pub fn with_canonical(mut self, canonical: CanonicalizeConfig) -> Self {
        self.canonical = canonical;
        self
    }

    pub fn with_perceptual(mut self, perceptual: PerceptualConfig) -> Self {
        self.perceptual = perceptual;
        self
    }

    pub fn with_align(mut self, align: AlignConfig) -> Self {
        self.align = align;
        self
    }

    pub fn with_structural(mut self, structural: StructuralConfig) -> Self {
        self.structural = structural;
        self
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_divergence(mut self, divergence: DivergenceWeights) -> Self {
        self.divergence = divergence;
        self
    }

    /// Validate every nested configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 {
            return Err(ConfigError::InvalidConfig(
                "version must be >= 1 (got 0)".into(),
            ));
        }
        self.canonical.validate()?;
        self.perceptual.validate()?;
        self.align.validate()?;
        self.structural.validate()?;
        self.thresholds.validate()?;
        self.divergence.validate()?;
        Ok(())
    }
}
