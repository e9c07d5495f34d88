use super::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(
        "No angle pair satisfying the bend constraint was found for residue {index} after {attempts} attempts"
    )]
    ConstraintUnsatisfiable { index: usize, attempts: usize },

    #[error("Residue index {index} is out of range for a chain of length {length}")]
    IndexOutOfRange { index: usize, length: usize },

    #[error("Chain has {actual} residues but the configuration expects {expected}")]
    ChainLengthMismatch { expected: usize, actual: usize },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
