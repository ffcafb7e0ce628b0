use canonical::CanonicalError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::weights::SectionWeights;

/// Configuration for section extraction and comparison.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StructuralConfig {
    /// Configuration schema version. Must be >= 1.
    pub version: u32,
    /// Fixed per-section weights.
    pub weights: SectionWeights,
    /// Abstract bonus per shared multi-word phrase.
    pub structure_bonus_step: f64,
    /// Cap on the abstract structure bonus.
    pub structure_bonus_cap: f64,
    /// Characters of body text standing in for a missing description.
    pub description_fallback_chars: usize,
    /// Characters of the first line standing in for a missing title.
    pub title_fallback_chars: usize,
}

impl StructuralConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(mut self, weights: SectionWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_structure_bonus(mut self, step: f64, cap: f64) -> Self {
        self.structure_bonus_step = step;
        self.structure_bonus_cap = cap;
        self
    }

    pub fn validate(&self) -> Result<(), StructuralError> {
        if self.version == 0 {
            return Err(StructuralError::InvalidConfig(
                "version must be >= 1".into(),
            ));
        }
        if !(self.structure_bonus_step >= 0.0) {
            return Err(StructuralError::InvalidConfig(
                "structure_bonus_step must be >= 0".into(),
            ));
        }
        if !(0.0..=100.0).contains(&self.structure_bonus_cap) {
            return Err(StructuralError::InvalidConfig(
                "structure_bonus_cap must be within [0, 100]".into(),
            ));
        }
        if self.title_fallback_chars == 0 {
            return Err(StructuralError::InvalidConfig(
                "title_fallback_chars must be >= 1".into(),
            ));
        }
        self.weights.validate()
    }
}

impl Default for StructuralConfig {
    fn default() -> Self {
        Self {
            version: 1,
            weights: SectionWeights::default(),
            structure_bonus_step: 5.0,
            structure_bonus_cap: 20.0,
            description_fallback_chars: 200,
            title_fallback_chars: 100,
        }
    }
}

/// Errors raised while building structural components.
///
/// All of them are construction-time failures; extraction and comparison
/// themselves are infallible.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StructuralError {
    #[error("invalid structural config: {0}")]
    InvalidConfig(String),
    #[error("invalid section weights: {0}")]
    InvalidWeights(String),
    #[error("invalid vocabulary: {0}")]
    InvalidVocabulary(String),
    #[error(transparent)]
    Canonical(#[from] CanonicalError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let cfg = StructuralConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.structure_bonus_step, 5.0);
        assert_eq!(cfg.structure_bonus_cap, 20.0);
        assert_eq!(cfg.description_fallback_chars, 200);
    }

    #[test]
    fn rejects_version_zero() {
        let cfg = StructuralConfig {
            version: 0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(StructuralError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_bad_bonus() {
        let cfg = StructuralConfig::new().with_structure_bonus(-1.0, 20.0);
        assert!(cfg.validate().is_err());
        let cfg = StructuralConfig::new().with_structure_bonus(5.0, 150.0);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn propagates_weight_errors() {
        let weights = SectionWeights {
            title: 0.5,
            ..SectionWeights::default()
        };
        let cfg = StructuralConfig::new().with_weights(weights);
        assert!(matches!(cfg.validate(), Err(StructuralError::InvalidWeights(_))));
    }
}
