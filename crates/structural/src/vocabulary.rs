//! Technology and methodology vocabularies.
//!
//! Vocabularies are versioned configuration data. The built-in one ships as
//! an embedded JSON asset; callers can inject their own through
//! [`Vocabulary::from_json`] or [`Vocabulary::new`].
//!
//! Every term must already be in canonical form (what
//! [`canonical::normalize`] would produce), otherwise it could never match a
//! token and the vocabulary is rejected. [`Vocabulary::new`] checks against
//! the default config; extractors re-check against their own.

use std::collections::HashSet;

use canonical::{normalize, CanonicalizeConfig};
use serde::Deserialize;

use crate::config::StructuralError;

const BUILTIN_VOCABULARY: &str = include_str!("../assets/vocabulary_v1.json");

#[derive(Debug, Deserialize)]
struct VocabularyFile {
    version: u32,
    technologies: Vec<String>,
    compounds: Vec<String>,
    methodology: Vec<String>,
}

/// Validated lookup tables for technology and methodology extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    version: u32,
    technologies: HashSet<String>,
    compounds: Vec<Vec<String>>,
    methodology: HashSet<String>,
}

impl Vocabulary {
    /// The vocabulary bundled with this crate.
    pub fn builtin() -> Result<Self, StructuralError> {
        Self::from_json(BUILTIN_VOCABULARY)
    }

    /// Parse `{"version", "technologies", "compounds", "methodology"}`.
    pub fn from_json(json: &str) -> Result<Self, StructuralError> {
        let file: VocabularyFile = serde_json::from_str(json)
            .map_err(|err| StructuralError::InvalidVocabulary(err.to_string()))?;
        Self::new(file.version, file.technologies, file.compounds, file.methodology)
    }

    /// Build a vocabulary from explicit term lists.
    ///
    /// Technologies and methodology terms are single tokens. Compounds are
    /// phrases of two or more tokens, matched as contiguous runs and recorded
    /// in hyphenated form.
    pub fn new<T, C, M>(
        version: u32,
        technologies: T,
        compounds: C,
        methodology: M,
    ) -> Result<Self, StructuralError>
    where
        T: IntoIterator,
        T::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        if version == 0 {
            return Err(StructuralError::InvalidVocabulary(
                "vocabulary version must be >= 1".into(),
            ));
        }
        let cfg = CanonicalizeConfig::default();

        let technologies = single_terms("technologies", technologies, &cfg)?;
        let methodology = single_terms("methodology", methodology, &cfg)?;

        let mut phrases: Vec<Vec<String>> = Vec::new();
        for compound in compounds {
            let compound: String = compound.into();
            check_normalized("compounds", &compound, &cfg)?;
            let words: Vec<String> = compound.split(' ').map(str::to_string).collect();
            if words.len() < 2 {
                return Err(StructuralError::InvalidVocabulary(format!(
                    "compound {compound:?} must contain at least two words"
                )));
            }
            if !phrases.contains(&words) {
                phrases.push(words);
            }
        }
        if phrases.is_empty() {
            return Err(StructuralError::InvalidVocabulary(
                "compounds list is empty".into(),
            ));
        }

        Ok(Self {
            version,
            technologies,
            compounds: phrases,
            methodology,
        })
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Fail when some term would never match tokens normalized under `cfg`.
    pub fn ensure_normalized(&self, cfg: &CanonicalizeConfig) -> Result<(), StructuralError> {
        for term in &self.technologies {
            check_normalized("technologies", term, cfg)?;
        }
        for term in &self.methodology {
            check_normalized("methodology", term, cfg)?;
        }
        for phrase in &self.compounds {
            check_normalized("compounds", &phrase.join(" "), cfg)?;
        }
        Ok(())
    }

    pub fn is_technology(&self, token: &str) -> bool {
        self.technologies.contains(token)
    }

    pub fn is_methodology(&self, token: &str) -> bool {
        self.methodology.contains(token)
    }

    /// Compound phrases as word sequences.
    pub fn compounds(&self) -> &[Vec<String>] {
        &self.compounds
    }

    /// Hyphenated forms of every compound found as a contiguous run in `tokens`.
    pub fn find_compounds<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<String> {
        self.compounds
            .iter()
            .filter(|phrase| {
                tokens.windows(phrase.len()).any(|window| {
                    window
                        .iter()
                        .zip(phrase.iter())
                        .all(|(token, word)| token.as_ref() == word)
                })
            })
            .map(|phrase| phrase.join("-"))
            .collect()
    }
}

fn single_terms<I>(
    list: &str,
    terms: I,
    cfg: &CanonicalizeConfig,
) -> Result<HashSet<String>, StructuralError>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut set = HashSet::new();
    for term in terms {
        let term: String = term.into();
        check_normalized(list, &term, cfg)?;
        if term.contains(' ') {
            return Err(StructuralError::InvalidVocabulary(format!(
                "{list} term {term:?} must be a single token"
            )));
        }
        set.insert(term);
    }
    if set.is_empty() {
        return Err(StructuralError::InvalidVocabulary(format!(
            "{list} list is empty"
        )));
    }
    Ok(set)
}

fn check_normalized(
    list: &str,
    term: &str,
    cfg: &CanonicalizeConfig,
) -> Result<(), StructuralError> {
    if term.is_empty() {
        return Err(StructuralError::InvalidVocabulary(format!(
            "{list} contains an empty term"
        )));
    }
    if normalize(term, cfg) != term {
        return Err(StructuralError::InvalidVocabulary(format!(
            "{list} term {term:?} is not in normalized form"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_loads() {
        let vocab = Vocabulary::builtin().unwrap();
        assert_eq!(vocab.version(), 1);
        assert!(vocab.is_technology("pytorch"));
        assert!(vocab.is_technology("react-native"));
        assert!(vocab.is_methodology("agile"));
        assert!(!vocab.is_technology("banana"));
    }

    #[test]
    fn finds_contiguous_compounds_only() {
        let vocab = Vocabulary::builtin().unwrap();
        let tokens = ["we", "use", "deep", "learning", "for", "computer", "and", "vision"];
        assert_eq!(vocab.find_compounds(&tokens), vec!["deep-learning".to_string()]);
    }

    #[test]
    fn rejects_version_zero() {
        let err = Vocabulary::new(0, ["rust"], ["deep learning"], ["agile"]).unwrap_err();
        assert!(matches!(err, StructuralError::InvalidVocabulary(_)));
    }

    #[test]
    fn rejects_empty_lists_and_terms() {
        let empty: [&str; 0] = [];
        assert!(Vocabulary::new(1, empty, ["deep learning"], ["agile"]).is_err());
        assert!(Vocabulary::new(1, ["rust", ""], ["deep learning"], ["agile"]).is_err());
        assert!(Vocabulary::new(1, ["rust"], empty, ["agile"]).is_err());
    }

    #[test]
    fn rejects_unnormalized_terms() {
        assert!(Vocabulary::new(1, ["C++"], ["deep learning"], ["agile"]).is_err());
        assert!(Vocabulary::new(1, ["rust"], ["Deep Learning"], ["agile"]).is_err());
        assert!(Vocabulary::new(1, ["rust"], ["deep  learning"], ["agile"]).is_err());
    }

    #[test]
    fn rejects_single_word_compound() {
        assert!(Vocabulary::new(1, ["rust"], ["learning"], ["agile"]).is_err());
    }

    #[test]
    fn builtin_holds_under_other_configs() {
        let vocab = Vocabulary::builtin().unwrap();
        let raw = CanonicalizeConfig {
            normalize_unicode: false,
            ..CanonicalizeConfig::default()
        };
        assert!(vocab.ensure_normalized(&raw).is_ok());

        let cased = CanonicalizeConfig {
            lowercase: false,
            ..CanonicalizeConfig::default()
        };
        let upper = Vocabulary::new(1, ["rust"], ["deep learning"], ["agile"]).unwrap();
        assert!(upper.ensure_normalized(&cased).is_ok());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(Vocabulary::from_json("{\"version\": 1}").is_err());
        assert!(Vocabulary::from_json("not json").is_err());
    }
}
