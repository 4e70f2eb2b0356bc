//! CLI error types.

use std::path::PathBuf;

use holdtrack_core::HoldtrackError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file could not be read.
    #[error("Cannot read {path}: {source}")]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Input file is not a valid fund history.
    #[error("Invalid fund history in {path}: {reason}")]
    InvalidInput {
        /// File path.
        path: PathBuf,
        /// What was wrong.
        reason: String,
    },

    /// The history holds no usable filing.
    #[error("No filings for fund {0}")]
    NoFilings(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the analytics core.
    #[error(transparent)]
    Core(#[from] HoldtrackError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
