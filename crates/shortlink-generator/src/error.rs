use thiserror::Error;

/// Errors returned by id generators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("invalid id length {0}; expected at least 1")]
    InvalidLength(usize),
    #[error("secure random source failed: {0}")]
    Entropy(String),
}
