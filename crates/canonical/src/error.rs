use thiserror::Error;

/// Errors that can occur in the canonical text layer.
///
/// Empty input is deliberately not an error here: normalizing whitespace-only
/// text yields an empty string and callers decide what that means.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid stopword list: {0}")]
    InvalidStopwords(String),
}
