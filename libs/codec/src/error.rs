//! Codec errors for handle-and-fraction price text
//!
//! Malformed price text is a hard failure: there is no recovery value for a
//! corrupted quote, so every variant carries the raw input and a reason the
//! caller can log verbatim.

use thiserror::Error;
use types::PriceError;

/// Price codec errors with diagnostic context
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CodecError {
    /// Text does not match the `whole-32nds[tag]` grammar
    #[error("Malformed notation '{input}': {reason}")]
    MalformedNotation { input: String, reason: String },

    /// Encode precondition failed (negative, non-finite or off-grid input)
    #[error("Cannot encode price: {0}")]
    Price(#[from] PriceError),
}

impl CodecError {
    /// Create MalformedNotation with the offending input and reason
    pub fn malformed(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedNotation {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for codec operations
pub type CodecResult<T> = std::result::Result<T, CodecError>;
