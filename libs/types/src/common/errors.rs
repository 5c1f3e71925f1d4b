//! Error types for grid price conversion and identifier validation
//!
//! Every failure here is a programming-error class failure: there is no I/O
//! behind these types, so nothing is retried and callers propagate with `?`.

use thiserror::Error;

/// Errors that can occur while validating identifiers and tenor labels
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Tenor label could not be reduced to a numeric maturity
    #[error("Invalid tenor format: '{input}' - expected an integer with optional 'Y' suffix (e.g. \"10Y\")")]
    InvalidTenorFormat { input: String },

    /// Instrument label is empty or contains the feed delimiter
    #[error("Invalid instrument label: '{input}' ({reason})")]
    InvalidInstrument { input: String, reason: String },

    /// Side text other than the upper-case wire form
    #[error("Invalid side: '{input}' - expected BUY or SELL")]
    InvalidSide { input: String },
}

/// Errors that can occur converting between decimal values and 1/256 grid prices
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PriceError {
    /// Value is not finite (NaN or infinity)
    #[error("Value is not finite: {value}")]
    NotFinite { value: f64 },

    /// Treasury prices are never negative in this domain
    #[error("Negative price: {value} (grid prices are non-negative)")]
    Negative { value: f64 },

    /// Value does not sit on the 1/256 grid within tolerance
    #[error("Off-grid price: {value} is {ticks} ticks, not a whole number of 1/256ths")]
    OffGrid { value: f64, ticks: f64 },

    /// Invalid decimal string format
    #[error("Invalid decimal string: '{input}' - expected numeric format")]
    InvalidDecimal { input: String },

    /// Value exceeds the maximum representable tick count
    #[error("Overflow: value {value} exceeds maximum representable price")]
    Overflow { value: f64 },
}

impl PriceError {
    /// Classify a decimal string failure for messages that carry the raw input
    pub fn invalid_decimal(input: impl Into<String>) -> Self {
        Self::InvalidDecimal {
            input: input.into(),
        }
    }
}
