//! The five document sections and their fixed weights.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::StructuralError;

/// Tolerance for the weights-sum-to-one check.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// A comparable section of a document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Title,
    Abstract,
    Technologies,
    Keywords,
    Methodology,
}

impl Section {
    /// All sections in report order.
    pub const ALL: [Section; 5] = [
        Section::Title,
        Section::Abstract,
        Section::Technologies,
        Section::Keywords,
        Section::Methodology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Title => "title",
            Section::Abstract => "abstract",
            Section::Technologies => "technologies",
            Section::Keywords => "keywords",
            Section::Methodology => "methodology",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-section weights. Each weight lies in (0, 1) and together they sum to 1.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SectionWeights {
    pub title: f64,
    pub r#abstract: f64,
    pub technologies: f64,
    pub keywords: f64,
    pub methodology: f64,
}

impl SectionWeights {
    pub fn weight(&self, section: Section) -> f64 {
        match section {
            Section::Title => self.title,
            Section::Abstract => self.r#abstract,
            Section::Technologies => self.technologies,
            Section::Keywords => self.keywords,
            Section::Methodology => self.methodology,
        }
    }

    pub fn sum(&self) -> f64 {
        Section::ALL.iter().map(|s| self.weight(*s)).sum()
    }

    pub fn validate(&self) -> Result<(), StructuralError> {
        for section in Section::ALL {
            let weight = self.weight(section);
            if !(weight > 0.0 && weight < 1.0) {
                return Err(StructuralError::InvalidWeights(format!(
                    "{section} weight must be within (0, 1) (got {weight})"
                )));
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(StructuralError::InvalidWeights(format!(
                "weights must sum to 1.0 (got {sum})"
            )));
        }
        Ok(())
    }
}

impl Default for SectionWeights {
    fn default() -> Self {
        Self {
            title: 0.15,
            r#abstract: 0.35,
            technologies: 0.25,
            keywords: 0.15,
            methodology: 0.10,
        }
    }
}
