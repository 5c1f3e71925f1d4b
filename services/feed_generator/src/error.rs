//! Error types for feed generation

use codec::CodecError;
use std::path::PathBuf;
use thiserror::Error;
use types::{PriceError, ValidationError};

/// Feed generation errors
///
/// Everything except `Io`, `Csv` and `Json` is a programming-error class
/// failure: the core never retries and surfaces it to the immediate caller.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Oscillator, expander or feed parameters violate their contract
    #[error("Precondition violation: {context}")]
    PreconditionViolation { context: String },

    /// Instrument label or tenor could not be interpreted
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Price text could not be produced or parsed
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Decimal value could not enter the 1/256 grid
    #[error(transparent)]
    Price(#[from] PriceError),

    /// Writing a feed file failed
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Delimited serialization failed
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl GeneratorError {
    /// Create PreconditionViolation with context
    pub fn precondition(context: impl Into<String>) -> Self {
        Self::PreconditionViolation {
            context: context.into(),
        }
    }

    /// Wrap an I/O error with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for feed generation
pub type GeneratorResult<T> = std::result::Result<T, GeneratorError>;
