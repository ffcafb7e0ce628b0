//! Sentence alignment.
//!
//! Every uploaded sentence is compared against every source sentence; the
//! single best source sentence is kept when it clears the configured
//! threshold. Similarity is word-set Jaccard plus a positional bonus for
//! words that sit at the same index in both sentences.
//!
//! The aligner only sees pre-tokenized sentences. Normalization and
//! tokenization belong to the canonical layer.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::{AlignConfig, PerceptualError};
use crate::similarity::{clamp_score, jaccard};

/// A sentence prepared for alignment: its line number, original text and
/// canonical word tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignableSentence {
    line: usize,
    text: String,
    words: Vec<String>,
    word_set: BTreeSet<String>,
}

impl AlignableSentence {
    pub fn new(line: usize, text: impl Into<String>, words: Vec<String>) -> Self {
        let word_set = words.iter().cloned().collect();
        Self {
            line,
            text: text.into(),
            words,
            word_set,
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word_set(&self) -> &BTreeSet<String> {
        &self.word_set
    }
}

/// Best source sentence found for one uploaded sentence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlignedSentence {
    pub uploaded_line: usize,
    pub uploaded: String,
    pub source_line: usize,
    pub source: String,
    pub similarity: f64,
}

/// Result of aligning one document against another.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Alignment {
    /// Retained matches, ordered by uploaded line.
    pub matches: Vec<AlignedSentence>,
    /// Number of uploaded sentences, including any past the truncation bound.
    pub uploaded_count: usize,
    /// Distinct words covered by the matched uploaded sentences.
    pub covered_words: usize,
    /// True when either side exceeded `max_sentences`.
    pub truncated: bool,
}

impl Alignment {
    /// Matched sentences as a share (0-100) of all uploaded sentences.
    pub fn match_ratio(&self) -> f64 {
        if self.uploaded_count == 0 {
            return 0.0;
        }
        clamp_score(self.matches.len() as f64 / self.uploaded_count as f64 * 100.0)
    }

    /// Share (0-100) of uploaded sentences matched with similarity at or
    /// above `min_similarity`.
    pub fn share_at_least(&self, min_similarity: f64) -> f64 {
        if self.uploaded_count == 0 {
            return 0.0;
        }
        let strong = self
            .matches
            .iter()
            .filter(|m| m.similarity >= min_similarity)
            .count();
        clamp_score(strong as f64 / self.uploaded_count as f64 * 100.0)
    }
}

/// Pairs uploaded sentences with their most similar source sentence.
#[derive(Debug, Clone)]
pub struct SentenceAligner {
    cfg: AlignConfig,
}

impl SentenceAligner {
    pub fn new(cfg: AlignConfig) -> Result<Self, PerceptualError> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &AlignConfig {
        &self.cfg
    }

    /// Similarity (0-100) of two sentences.
    pub fn similarity(&self, a: &AlignableSentence, b: &AlignableSentence) -> f64 {
        let base = jaccard(&a.word_set, &b.word_set);
        let same_position = a
            .words
            .iter()
            .zip(b.words.iter())
            .filter(|(x, y)| x == y)
            .count();
        let bonus =
            (same_position as f64 * self.cfg.positional_bonus_step).min(self.cfg.positional_bonus_cap);
        clamp_score(base + bonus)
    }

    /// Align `uploaded` against `source`.
    ///
    /// Cost is O(U×S) over the bounded inputs. Exceeding `max_sentences` on
    /// either side truncates that side and marks the result; it never fails.
    pub fn align(&self, uploaded: &[AlignableSentence], source: &[AlignableSentence]) -> Alignment {
        let max = self.cfg.max_sentences;
        let truncated = uploaded.len() > max || source.len() > max;
        let uploaded_window = &uploaded[..uploaded.len().min(max)];
        let source_window = &source[..source.len().min(max)];

        let mut matches = Vec::new();
        let mut covered: BTreeSet<&str> = BTreeSet::new();

        for up in uploaded_window {
            let mut best: Option<(&AlignableSentence, f64)> = None;
            for candidate in source_window {
                let score = self.similarity(up, candidate);
                // Strict comparison keeps the earliest source sentence on ties.
                let better = match best {
                    Some((_, best_score)) => score > best_score,
                    None => true,
                };
                if better {
                    best = Some((candidate, score));
                }
            }

            if let Some((src, score)) = best {
                if score > 0.0 && score >= self.cfg.min_similarity {
                    covered.extend(up.word_set.iter().map(String::as_str));
                    matches.push(AlignedSentence {
                        uploaded_line: up.line,
                        uploaded: up.text.clone(),
                        source_line: src.line,
                        source: src.text.clone(),
                        similarity: score,
                    });
                }
            }
        }

        matches.sort_by_key(|m| m.uploaded_line);

        Alignment {
            matches,
            uploaded_count: uploaded.len(),
            covered_words: covered.len(),
            truncated,
        }
    }
}
