//! # Identifiers - Instruments, Tenors and Typed String IDs
//!
//! Instruments in the fixture feeds are opaque labels (`"2Y"`, `"10Y"`, or a
//! CUSIP). Only the order-book path looks inside a label: it reduces it to a
//! numeric [`Tenor`] that serves as a secondary sort key.
//!
//! Trade and inquiry identifiers are plain strings on the wire. They get
//! distinct wrapper types so a trade ID can never be passed where an inquiry ID
//! is expected.
//!
//! ```rust
//! use types::{Instrument, Tenor, TradeId};
//!
//! let ten_year = Instrument::new("10Y").unwrap();
//! assert_eq!(ten_year.tenor().unwrap(), Tenor::years(10));
//!
//! let trade = TradeId::new("AbCdEfGhIj");
//! assert_eq!(trade.as_str(), "AbCdEfGhIj");
//! ```

use crate::common::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit suffix stripped from tenor labels before numeric parsing
pub const TENOR_SUFFIX: char = 'Y';

/// Opaque instrument label as it appears in the first column of every feed
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Instrument(String);

impl Instrument {
    /// Create an instrument label, rejecting empty or whitespace-bearing input
    pub fn new(label: impl Into<String>) -> Result<Self, ValidationError> {
        let label = label.into();
        if label.is_empty() {
            return Err(ValidationError::InvalidInstrument {
                input: label,
                reason: "label is empty".to_string(),
            });
        }
        if label.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ValidationError::InvalidInstrument {
                input: label,
                reason: "label contains whitespace or control characters".to_string(),
            });
        }
        Ok(Self(label))
    }

    /// Label as written to the feeds
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric tenor parsed from the label (order-book sort key)
    pub fn tenor(&self) -> Result<Tenor, ValidationError> {
        self.0.parse()
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Instrument {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Maturity in years, e.g. 10 for `"10Y"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tenor(u32);

impl Tenor {
    /// Create a tenor from a year count
    #[inline]
    pub const fn years(years: u32) -> Self {
        Self(years)
    }

    /// Year count
    #[inline]
    pub const fn as_years(self) -> u32 {
        self.0
    }
}

impl FromStr for Tenor {
    type Err = ValidationError;

    /// Strip one trailing `Y` (if present) and parse the rest as an integer.
    /// Never defaults: anything unparseable is `InvalidTenorFormat`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_suffix(TENOR_SUFFIX).unwrap_or(s);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidTenorFormat {
                input: s.to_string(),
            });
        }
        digits
            .parse::<u32>()
            .map(Self)
            .map_err(|_| ValidationError::InvalidTenorFormat {
                input: s.to_string(),
            })
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0, TENOR_SUFFIX)
    }
}

/// Generate a string-backed typed identifier
///
/// Same shape for every ID kind: construction from anything string-like,
/// borrowed access, and transparent serde so feeds see the bare string.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an identifier string
            #[inline]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the identifier
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Unwrap into the owned string
            #[inline]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

define_string_id! {
    /// Booking-system trade identifier (random alphabetic string)
    TradeId
}

define_string_id! {
    /// Client inquiry identifier (UUID text)
    InquiryId
}
