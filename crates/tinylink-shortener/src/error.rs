use thiserror::Error;

/// Invalid code generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("code length must be between {min} and {max}, got {got}")]
    InvalidLength { min: usize, max: usize, got: usize },
    #[error("invalid alphabet: {0}")]
    InvalidAlphabet(String),
}
