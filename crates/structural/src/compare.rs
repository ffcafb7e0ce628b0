//! Section-by-section comparison of two profiles.

use std::collections::BTreeSet;

use perceptual::{clamp_score, jaccard};
use serde::{Deserialize, Serialize};

use crate::config::{StructuralConfig, StructuralError};
use crate::profile::SectionProfile;
use crate::weights::{Section, SectionWeights};

/// Similarity of one section with its weight and supporting evidence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectionScore {
    pub section: Section,
    pub similarity: f64,
    pub weight: f64,
    pub weighted_contribution: f64,
    pub evidence: String,
}

/// The five section scores of one comparison, in [`Section::ALL`] order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct SectionScores(Vec<SectionScore>);

impl SectionScores {
    pub fn iter(&self) -> impl Iterator<Item = &SectionScore> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[SectionScore] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<SectionScore> {
        self.0
    }

    /// Similarity of `section`; 0 when absent.
    pub fn similarity(&self, section: Section) -> f64 {
        self.0
            .iter()
            .find(|score| score.section == section)
            .map_or(0.0, |score| score.similarity)
    }

    /// Sum of weighted contributions.
    pub fn weighted_average(&self) -> f64 {
        clamp_score(self.0.iter().map(|score| score.weighted_contribution).sum())
    }
}

/// Compares section profiles with fixed weights.
#[derive(Debug, Clone)]
pub struct SectionComparator {
    weights: SectionWeights,
    bonus_step: f64,
    bonus_cap: f64,
}

impl SectionComparator {
    pub fn new(cfg: &StructuralConfig) -> Result<Self, StructuralError> {
        cfg.validate()?;
        Ok(Self {
            weights: cfg.weights,
            bonus_step: cfg.structure_bonus_step,
            bonus_cap: cfg.structure_bonus_cap,
        })
    }

    pub fn weights(&self) -> &SectionWeights {
        &self.weights
    }

    pub fn compare(&self, uploaded: &SectionProfile, source: &SectionProfile) -> SectionScores {
        let scores = Section::ALL
            .iter()
            .map(|&section| {
                let (similarity, evidence) = match section {
                    Section::Title => set_score(&uploaded.title_words, &source.title_words),
                    Section::Abstract => {
                        self.abstract_score(&uploaded.abstract_phrases, &source.abstract_phrases)
                    }
                    Section::Technologies => {
                        set_score(&uploaded.technologies, &source.technologies)
                    }
                    Section::Keywords => set_score(&uploaded.keywords, &source.keywords),
                    Section::Methodology => set_score(&uploaded.methodology, &source.methodology),
                };
                let weight = self.weights.weight(section);
                SectionScore {
                    section,
                    similarity,
                    weight,
                    weighted_contribution: similarity * weight,
                    evidence,
                }
            })
            .collect();
        SectionScores(scores)
    }

    /// Phrase Jaccard plus a bonus for every shared multi-word phrase.
    fn abstract_score(&self, a: &BTreeSet<String>, b: &BTreeSet<String>) -> (f64, String) {
        let shared: Vec<&String> = a.intersection(b).collect();
        let multi_word = shared.iter().filter(|phrase| phrase.contains(' ')).count();
        let bonus = (multi_word as f64 * self.bonus_step).min(self.bonus_cap);
        let similarity = if shared.is_empty() {
            0.0
        } else {
            clamp_score(jaccard(a, b) + bonus)
        };
        let evidence = if shared.is_empty() {
            "None".to_string()
        } else {
            format!("{} shared phrases, {multi_word} multi-word", shared.len())
        };
        (similarity, evidence)
    }
}

fn set_score(a: &BTreeSet<String>, b: &BTreeSet<String>) -> (f64, String) {
    let shared: Vec<&str> = a.intersection(b).map(String::as_str).collect();
    let evidence = if shared.is_empty() {
        "None".to_string()
    } else {
        shared.join(", ")
    };
    (jaccard(a, b), evidence)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn comparator() -> SectionComparator {
        SectionComparator::new(&StructuralConfig::default()).unwrap()
    }

    fn profile() -> SectionProfile {
        SectionProfile {
            title: "Campus Chatbot".into(),
            title_words: set(&["campus", "chatbot"]),
            abstract_phrases: set(&["answers", "answers student", "student", "student questions"]),
            technologies: set(&["python", "rasa", "react"]),
            keywords: set(&["chatbot", "nlp"]),
            methodology: set(&["classification"]),
        }
    }

    #[test]
    fn identical_profiles_score_100_everywhere() {
        let scores = comparator().compare(&profile(), &profile());
        for score in scores.iter() {
            assert_eq!(score.similarity, 100.0, "{}", score.section);
        }
        assert!((scores.weighted_average() - 100.0).abs() < 1e-6);
    }

    #[test]
    fn scores_follow_section_order_and_weights() {
        let scores = comparator().compare(&profile(), &profile());
        let sections: Vec<Section> = scores.iter().map(|s| s.section).collect();
        assert_eq!(sections, Section::ALL.to_vec());
        let weights: Vec<f64> = scores.iter().map(|s| s.weight).collect();
        assert_eq!(weights, vec![0.15, 0.35, 0.25, 0.15, 0.10]);
    }

    #[test]
    fn abstract_bonus_for_shared_bigrams() {
        let a = set(&["smart", "smart parking", "parking", "parking sensors", "sensors"]);
        let b = set(&["smart", "smart parking", "parking", "parking meters", "meters"]);
        let (similarity, evidence) = comparator().abstract_score(&a, &b);
        // jaccard 3/7 = 42.857143, one shared bigram = +5
        assert!((similarity - 47.857143).abs() < 1e-6);
        assert_eq!(evidence, "3 shared phrases, 1 multi-word");
    }

    #[test]
    fn abstract_bonus_is_capped() {
        let phrases: Vec<String> = (0..10).map(|i| format!("word{i} next{i}")).collect();
        let mut a: BTreeSet<String> = phrases.iter().cloned().collect();
        let b = a.clone();
        a.insert("extra".into());
        let (similarity, _) = comparator().abstract_score(&a, &b);
        // jaccard 10/11 = 90.909091 + capped bonus 20, clamped
        assert_eq!(similarity, 100.0);
    }

    #[test]
    fn disjoint_sections_score_zero_with_none_evidence() {
        let other = SectionProfile {
            title: "Weather Station".into(),
            title_words: set(&["weather", "station"]),
            abstract_phrases: set(&["rainfall", "rainfall sensor"]),
            technologies: set(&["arduino"]),
            keywords: set(&["iot"]),
            methodology: set(&["prototype"]),
        };
        let scores = comparator().compare(&profile(), &other);
        for score in scores.iter() {
            assert_eq!(score.similarity, 0.0);
            assert_eq!(score.evidence, "None");
            assert_eq!(score.weighted_contribution, 0.0);
        }
    }

    #[test]
    fn technology_evidence_lists_shared_terms() {
        let mut other = profile();
        other.technologies = set(&["python", "react", "django"]);
        let scores = comparator().compare(&profile(), &other);
        let tech = scores
            .iter()
            .find(|s| s.section == Section::Technologies)
            .unwrap();
        assert_eq!(tech.evidence, "python, react");
        assert_eq!(tech.similarity, 50.0);
        assert_eq!(scores.similarity(Section::Technologies), 50.0);
    }

    #[test]
    fn empty_profiles_score_zero() {
        let empty = SectionProfile::default();
        let scores = comparator().compare(&empty, &empty);
        assert_eq!(scores.weighted_average(), 0.0);
    }
}
