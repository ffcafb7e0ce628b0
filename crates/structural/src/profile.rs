//! Section extraction.
//!
//! A [`SectionProfile`] is derived from a document and never edited: when
//! the document changes the profile is extracted again.

use std::borrow::Cow;
use std::collections::BTreeSet;

use canonical::{normalize, tokenize_all, tokenize_words, CanonicalizeConfig};
use serde::{Deserialize, Serialize};

use crate::config::{StructuralConfig, StructuralError};
use crate::vocabulary::Vocabulary;

/// Title words shorter than this are ignored.
const TITLE_MIN_CHARS: usize = 4;
/// Single-word abstract phrases shorter than this are ignored.
const UNIGRAM_MIN_CHARS: usize = 5;

/// Borrowed view of the fields a profile is extracted from.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionInput<'a> {
    pub title: Option<&'a str>,
    pub text: &'a str,
    /// `text` already normalized under the extractor's canonical config.
    pub canonical_text: Option<&'a str>,
    pub description: Option<&'a str>,
    pub tags: &'a [String],
    pub methodology: Option<&'a str>,
}

/// Structured feature sets of one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SectionProfile {
    /// Title actually used, after falling back to the first line when needed.
    pub title: String,
    pub title_words: BTreeSet<String>,
    pub abstract_phrases: BTreeSet<String>,
    pub technologies: BTreeSet<String>,
    pub keywords: BTreeSet<String>,
    pub methodology: BTreeSet<String>,
}

impl SectionProfile {
    /// True when no section carries any feature.
    pub fn is_empty(&self) -> bool {
        self.title_words.is_empty()
            && self.abstract_phrases.is_empty()
            && self.technologies.is_empty()
            && self.keywords.is_empty()
            && self.methodology.is_empty()
    }
}

/// Builds section profiles against a fixed vocabulary.
///
/// Title words and abstract phrases follow the canonical config as given.
/// Vocabulary lookups always run on lowercased text, since vocabulary terms
/// are lowercase.
#[derive(Debug, Clone)]
pub struct SectionExtractor {
    vocabulary: Vocabulary,
    canonical: CanonicalizeConfig,
    lookup: CanonicalizeConfig,
    cfg: StructuralConfig,
}

impl SectionExtractor {
    pub fn new(
        vocabulary: Vocabulary,
        canonical: CanonicalizeConfig,
        cfg: StructuralConfig,
    ) -> Result<Self, StructuralError> {
        canonical.validate()?;
        cfg.validate()?;
        let lookup = CanonicalizeConfig {
            lowercase: true,
            ..canonical.clone()
        };
        vocabulary.ensure_normalized(&lookup)?;
        Ok(Self {
            vocabulary,
            canonical,
            lookup,
            cfg,
        })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn extract(&self, input: &SectionInput<'_>) -> SectionProfile {
        let title = match input.title.filter(|t| !t.trim().is_empty()) {
            Some(title) => title.to_string(),
            None => fallback_title(input.text, self.cfg.title_fallback_chars),
        };
        let description = match input.description.filter(|d| !d.trim().is_empty()) {
            Some(description) => description.to_string(),
            None => input
                .text
                .chars()
                .take(self.cfg.description_fallback_chars)
                .collect(),
        };
        let methodology_text = input.methodology.unwrap_or_default();

        let text: Cow<'_, str> = match input.canonical_text {
            Some(text) => Cow::Borrowed(text),
            None => Cow::Owned(normalize(input.text, &self.canonical)),
        };
        let body: Cow<'_, str> = if text.is_empty() {
            Cow::Owned(normalize(&description, &self.canonical))
        } else {
            Cow::Borrowed(&*text)
        };

        let lookup_text: Cow<'_, str> = if self.canonical.lowercase {
            Cow::Borrowed(&*text)
        } else {
            Cow::Owned(normalize(input.text, &self.lookup))
        };
        let lookup_description = normalize(&description, &self.lookup);
        let lookup_methodology = normalize(methodology_text, &self.lookup);
        let lookup_tokens: Vec<&str> = [
            lookup_description.as_str(),
            &*lookup_text,
            lookup_methodology.as_str(),
        ]
        .into_iter()
        .flat_map(tokenize_all)
        .collect();

        let mut technologies: BTreeSet<String> = lookup_tokens
            .iter()
            .filter(|token| self.vocabulary.is_technology(token))
            .map(|token| token.to_string())
            .collect();
        technologies.extend(self.vocabulary.find_compounds(&lookup_tokens));

        let methodology = lookup_tokens
            .iter()
            .filter(|token| self.vocabulary.is_methodology(token))
            .map(|token| token.to_string())
            .collect();

        SectionProfile {
            title_words: self.title_words(&title),
            abstract_phrases: self.key_phrases(&body),
            technologies,
            keywords: input
                .tags
                .iter()
                .map(|tag| normalize_tag(tag))
                .filter(|keyword| !keyword.is_empty())
                .collect(),
            methodology,
            title,
        }
    }

    fn title_words(&self, title: &str) -> BTreeSet<String> {
        let normalized = normalize(title, &self.canonical);
        tokenize_words(&normalized, &self.canonical)
            .into_iter()
            .filter(|word| word.chars().count() >= TITLE_MIN_CHARS)
            .map(str::to_string)
            .collect()
    }

    /// Long single words plus every adjacent word pair of normalized text.
    fn key_phrases(&self, normalized: &str) -> BTreeSet<String> {
        let words = tokenize_words(normalized, &self.canonical);

        let mut phrases: BTreeSet<String> = words
            .iter()
            .filter(|word| word.chars().count() >= UNIGRAM_MIN_CHARS)
            .map(|word| word.to_string())
            .collect();
        phrases.extend(words.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));
        phrases
    }
}

/// First line or sentence of `text`, at most `max_chars` characters.
fn fallback_title(text: &str, max_chars: usize) -> String {
    let first = text
        .split(['.', '!', '?', '\n'])
        .next()
        .unwrap_or_default();
    first.chars().take(max_chars).collect()
}

/// Lowercase, drop one leading `#` and keep only word characters and hyphens.
fn normalize_tag(tag: &str) -> String {
    let lower = tag.to_lowercase();
    let stripped = lower.strip_prefix('#').unwrap_or(&lower);
    stripped
        .chars()
        .filter(|ch| ch.is_alphanumeric() || *ch == '_' || *ch == '-')
        .collect()
}
