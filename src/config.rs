//! YAML configuration file support.
//!
//! Every engine setting can be supplied in one YAML file and turned into an
//! [`EngineConfig`], or straight into an [`Engine`] when the file also names
//! replacement vocabulary or stopword assets.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "capstone review"
//!
//! canonical:
//!   version: 1
//!   normalize_unicode: true
//!   lowercase: true
//!   min_token_len: 3
//!   min_sentence_chars: 11
//!
//! lexical:
//!   version: 1
//!   k: 3
//!   seed: 17297687000019483309
//!   max_tokens: 50000
//!   max_sentences: 500
//!   min_sentence_similarity: 60.0
//!
//! structural:
//!   version: 1
//!   weights:
//!     title: 0.15
//!     abstract: 0.35
//!     technologies: 0.25
//!     keywords: 0.15
//!     methodology: 0.10
//!   vocabulary_path: "assets/vocabulary.json"
//!
//! engine:
//!   mode: "hybrid"
//!   use_parallel: true
//!   thresholds:
//!     inclusion: 20.0
//!     different_tech_cap: 40.0
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use canonical::{CanonicalError, CanonicalizeConfig, StopwordSet};
use matcher::{
    ConfigError, DetectionMode, DivergenceWeights, Engine, EngineConfig, Thresholds,
};
use perceptual::{AlignConfig, PerceptualConfig};
use serde::{Deserialize, Serialize};
use structural::{SectionWeights, StructuralConfig, StructuralError, Vocabulary};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),

    #[error("invalid vocabulary: {0}")]
    Vocabulary(#[from] StructuralError),

    #[error("invalid stopwords: {0}")]
    Stopwords(#[from] CanonicalError),

    #[error("engine construction failed: {0}")]
    Engine(#[from] ConfigError),
}

/// Top-level YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OriginalityConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub canonical: CanonicalYamlConfig,

    /// Shingle fingerprinting and sentence alignment
    #[serde(default)]
    pub lexical: LexicalYamlConfig,

    /// Section extraction and comparison
    #[serde(default)]
    pub structural: StructuralYamlConfig,

    /// Detection mode, parallelism and thresholds
    #[serde(default)]
    pub engine: EngineYamlConfig,
}

impl OriginalityConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: OriginalityConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.canonical.validate()?;
        self.lexical.validate()?;
        self.structural.validate()?;
        self.engine.validate()?;

        self.engine_config()
            .validate()
            .map_err(|err| ConfigLoadError::Validation(err.to_string()))
    }

    /// Engine configuration described by this file.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::new()
            .with_mode(self.engine.detection_mode())
            .with_parallel(self.engine.use_parallel)
            .with_canonical(self.canonical.to_config())
            .with_perceptual(self.lexical.to_perceptual())
            .with_align(self.lexical.to_align())
            .with_structural(self.structural.to_config())
            .with_thresholds(self.engine.thresholds.clone())
            .with_divergence(self.engine.divergence)
    }

    /// Build an engine, loading any vocabulary or stopword files named in
    /// the configuration.
    pub fn build_engine(&self) -> Result<Engine, ConfigLoadError> {
        let vocabulary = match &self.structural.vocabulary_path {
            Some(path) => Vocabulary::from_json(&fs::read_to_string(path)?)?,
            None => Vocabulary::builtin()?,
        };
        let stopwords = match &self.lexical.stopwords_path {
            Some(path) => StopwordSet::from_json(&fs::read_to_string(path)?)?,
            None => StopwordSet::english()?,
        };
        Ok(Engine::with_vocabulary(
            self.engine_config(),
            vocabulary,
            stopwords,
        )?)
    }
}

impl Default for OriginalityConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            canonical: CanonicalYamlConfig::default(),
            lexical: LexicalYamlConfig::default(),
            structural: StructuralYamlConfig::default(),
            engine: EngineYamlConfig::default(),
        }
    }
}

/// Text normalization YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "true_value")]
    pub normalize_unicode: bool,

    #[serde(default = "true_value")]
    pub lowercase: bool,

    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,

    #[serde(default = "default_min_sentence_chars")]
    pub min_sentence_chars: usize,
}

impl CanonicalYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.version == 0 {
            return Err(ConfigLoadError::Validation(
                "canonical.version must be >= 1".to_string(),
            ));
        }
        if self.min_token_len == 0 {
            return Err(ConfigLoadError::Validation(
                "canonical.min_token_len must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    fn to_config(&self) -> CanonicalizeConfig {
        CanonicalizeConfig {
            version: self.version,
            normalize_unicode: self.normalize_unicode,
            lowercase: self.lowercase,
            min_token_len: self.min_token_len,
            min_sentence_chars: self.min_sentence_chars,
        }
    }
}

impl Default for CanonicalYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            normalize_unicode: true,
            lowercase: true,
            min_token_len: default_min_token_len(),
            min_sentence_chars: default_min_sentence_chars(),
        }
    }
}

/// Lexical detector YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexicalYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_k")]
    pub k: usize,

    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    #[serde(default = "default_max_sentences")]
    pub max_sentences: usize,

    #[serde(default = "default_min_sentence_similarity")]
    pub min_sentence_similarity: f64,

    /// JSON stopword list replacing the bundled English list
    #[serde(default)]
    pub stopwords_path: Option<PathBuf>,
}

impl LexicalYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.version == 0 {
            return Err(ConfigLoadError::Validation(
                "lexical.version must be >= 1".to_string(),
            ));
        }
        if self.k == 0 {
            return Err(ConfigLoadError::Validation(
                "lexical.k must be >= 1".to_string(),
            ));
        }
        if self.max_sentences == 0 {
            return Err(ConfigLoadError::Validation(
                "lexical.max_sentences must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    fn to_perceptual(&self) -> PerceptualConfig {
        PerceptualConfig {
            version: self.version,
            k: self.k,
            seed: self.seed,
            max_tokens: self.max_tokens,
        }
    }

    fn to_align(&self) -> AlignConfig {
        AlignConfig::default()
            .with_max_sentences(self.max_sentences)
            .with_min_similarity(self.min_sentence_similarity)
    }
}

impl Default for LexicalYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            k: default_k(),
            seed: default_seed(),
            max_tokens: default_max_tokens(),
            max_sentences: default_max_sentences(),
            min_sentence_similarity: default_min_sentence_similarity(),
            stopwords_path: None,
        }
    }
}

/// Structural detector YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuralYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub weights: SectionWeights,

    #[serde(default = "default_structure_bonus_step")]
    pub structure_bonus_step: f64,

    #[serde(default = "default_structure_bonus_cap")]
    pub structure_bonus_cap: f64,

    /// JSON vocabulary replacing the bundled one
    #[serde(default)]
    pub vocabulary_path: Option<PathBuf>,
}

impl StructuralYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.version == 0 {
            return Err(ConfigLoadError::Validation(
                "structural.version must be >= 1".to_string(),
            ));
        }
        self.weights
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("structural.weights: {err}")))
    }

    fn to_config(&self) -> StructuralConfig {
        StructuralConfig {
            version: self.version,
            ..StructuralConfig::default()
        }
        .with_weights(self.weights)
        .with_structure_bonus(self.structure_bonus_step, self.structure_bonus_cap)
    }
}

impl Default for StructuralYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            weights: SectionWeights::default(),
            structure_bonus_step: default_structure_bonus_step(),
            structure_bonus_cap: default_structure_bonus_cap(),
            vocabulary_path: None,
        }
    }
}

/// Engine YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineYamlConfig {
    #[serde(default = "default_mode")]
    pub mode: String,

    #[serde(default)]
    pub use_parallel: bool,

    #[serde(default)]
    pub thresholds: Thresholds,

    #[serde(default)]
    pub divergence: DivergenceWeights,
}

impl EngineYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        let valid_modes = ["structural", "lexical", "hybrid"];
        if !valid_modes.contains(&self.mode.as_str()) {
            return Err(ConfigLoadError::Validation(format!(
                "engine.mode must be one of: {valid_modes:?}"
            )));
        }
        Ok(())
    }

    fn detection_mode(&self) -> DetectionMode {
        match self.mode.as_str() {
            "structural" => DetectionMode::Structural,
            "lexical" => DetectionMode::Lexical,
            _ => DetectionMode::Hybrid,
        }
    }
}

impl Default for EngineYamlConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            use_parallel: false,
            thresholds: Thresholds::default(),
            divergence: DivergenceWeights::default(),
        }
    }
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn true_value() -> bool {
    true
}
fn default_min_token_len() -> usize {
    3
}
fn default_min_sentence_chars() -> usize {
    11
}
fn default_k() -> usize {
    3
}
fn default_seed() -> u64 {
    0xF00D_BAAD_F00D_BAAD
}
fn default_max_tokens() -> usize {
    50_000
}
fn default_max_sentences() -> usize {
    500
}
fn default_min_sentence_similarity() -> f64 {
    60.0
}
fn default_structure_bonus_step() -> f64 {
    5.0
}
fn default_structure_bonus_cap() -> f64 {
    20.0
}
fn default_mode() -> String {
    "hybrid".to_string()
}
