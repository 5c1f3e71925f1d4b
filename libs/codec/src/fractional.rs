//! # Fractional Price Codec
//!
//! Converts between decimal prices and US Treasury handle-and-fraction
//! notation:
//!
//! ```text
//! 100-25+
//! │   │ └─ 256ths tag: "" = 0, "1".."7" (never "4"), "+" = 4/256
//! │   └─── 32nds, always two digits (00..31)
//! └─────── handle (whole points)
//! ```
//!
//! ## Encoding
//!
//! The decimal enters the 1/256 grid through [`TreasuryPrice::try_from_f64`],
//! which rejects negative, non-finite and off-grid input instead of silently
//! truncating it. On the grid every component is an integer division, so
//! `decode(encode(x)) == x` holds exactly for every grid value.
//!
//! ## Decoding
//!
//! Decoding accepts the canonical tags plus an explicit `"0"`, `"8"` or `"9"`.
//! A tag digit counts 256ths on top of the 32nds, so `"100-008"` is
//! `100 + 8/256` even though encoding would quote it as `"100-01"`. A literal
//! `"4"` is rejected because the half-tick is only ever quoted as `"+"`.

use crate::error::{CodecError, CodecResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use types::precision::{
    HALF_THIRTY_SECOND_TICKS, MAX_EXACT_TICKS, THIRTY_SECONDS_PER_POINT, TICKS_PER_POINT,
    TICKS_PER_THIRTY_SECOND,
};
use types::TreasuryPrice;

/// Separator between handle and fraction
pub const HANDLE_SEPARATOR: char = '-';

/// Sigil quoting the half-32nd (4/256)
pub const HALF_TICK_SIGIL: char = '+';

/// Trailing 256ths tag of a quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EighthsTag {
    /// Zero remainder, tag omitted
    Empty,
    /// Explicit digit 0..=9, never 4
    Digit(u8),
    /// Half a 32nd
    Plus,
}

impl EighthsTag {
    /// Canonical tag for an eighths-of-a-32nd remainder
    fn for_remainder(eighths: u64) -> Self {
        match eighths {
            0 => EighthsTag::Empty,
            r if r == HALF_THIRTY_SECOND_TICKS => EighthsTag::Plus,
            // Callers pass eighths() which is always < 8
            r => EighthsTag::Digit(r as u8),
        }
    }

    /// 256ths this tag adds on top of the 32nds
    pub fn eighths(self) -> u64 {
        match self {
            EighthsTag::Empty => 0,
            EighthsTag::Digit(d) => d as u64,
            EighthsTag::Plus => HALF_THIRTY_SECOND_TICKS,
        }
    }
}

impl fmt::Display for EighthsTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EighthsTag::Empty => Ok(()),
            EighthsTag::Digit(d) => write!(f, "{}", d),
            EighthsTag::Plus => write!(f, "{}", HALF_TICK_SIGIL),
        }
    }
}

/// Parsed handle-and-fraction quote, e.g. `100-25+`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FractionalNotation {
    whole: u64,
    thirty_seconds: u8,
    tag: EighthsTag,
}

impl FractionalNotation {
    /// Canonical notation for a grid price
    pub fn from_price(price: TreasuryPrice) -> Self {
        Self {
            whole: price.whole(),
            // thirty_seconds() is always < 32
            thirty_seconds: price.thirty_seconds() as u8,
            tag: EighthsTag::for_remainder(price.eighths()),
        }
    }

    /// Parse and validate `whole-32nds[tag]`
    pub fn parse(input: &str) -> CodecResult<Self> {
        let (whole_text, fraction_text) = input
            .split_once(HANDLE_SEPARATOR)
            .ok_or_else(|| CodecError::malformed(input, "missing '-' separator"))?;

        if whole_text.is_empty() {
            return Err(CodecError::malformed(
                input,
                "missing handle (negative prices are not quoted)",
            ));
        }
        if !whole_text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CodecError::malformed(
                input,
                "handle must be a non-negative integer",
            ));
        }
        if fraction_text.contains(HANDLE_SEPARATOR) {
            return Err(CodecError::malformed(input, "more than one '-' separator"));
        }

        let whole = whole_text
            .parse::<u64>()
            .map_err(|_| CodecError::malformed(input, "handle out of range"))?;

        let fraction = fraction_text.as_bytes();
        if fraction.len() < 2 || !fraction[..2].iter().all(u8::is_ascii_digit) {
            return Err(CodecError::malformed(input, "expected two-digit 32nds"));
        }
        let thirty_seconds = (fraction[0] - b'0') * 10 + (fraction[1] - b'0');
        if thirty_seconds as u64 >= THIRTY_SECONDS_PER_POINT {
            return Err(CodecError::malformed(
                input,
                format!("32nds value {} outside 00..31", thirty_seconds),
            ));
        }

        let tag = match &fraction[2..] {
            [] => EighthsTag::Empty,
            [b'+'] => EighthsTag::Plus,
            [b'4'] => {
                return Err(CodecError::malformed(
                    input,
                    "half-tick must be quoted as '+', not '4'",
                ))
            }
            [d @ b'0'..=b'9'] => EighthsTag::Digit(d - b'0'),
            [_] => {
                return Err(CodecError::malformed(
                    input,
                    "256ths tag must be '+' or a digit",
                ))
            }
            _ => return Err(CodecError::malformed(input, "unexpected trailing characters")),
        };

        let notation = Self {
            whole,
            thirty_seconds,
            tag,
        };
        // Reject handles too large for an exact price up front
        notation
            .checked_price()
            .ok_or_else(|| CodecError::malformed(input, "handle out of range"))?;
        Ok(notation)
    }

    fn checked_price(&self) -> Option<TreasuryPrice> {
        // Tags 8 and 9 carry past the 32nd, so add ticks rather than use from_parts
        let fraction = self.thirty_seconds as u64 * TICKS_PER_THIRTY_SECOND + self.tag.eighths();
        self.whole
            .checked_mul(TICKS_PER_POINT)
            .and_then(|ticks| ticks.checked_add(fraction))
            .filter(|ticks| *ticks <= MAX_EXACT_TICKS)
            .map(TreasuryPrice::from_ticks)
    }

    /// Handle (whole points)
    pub fn whole(&self) -> u64 {
        self.whole
    }

    /// 32nds within the point, `0..=31`
    pub fn thirty_seconds(&self) -> u8 {
        self.thirty_seconds
    }

    /// Trailing 256ths tag
    pub fn tag(&self) -> EighthsTag {
        self.tag
    }

    /// Exact grid price this quote denotes
    pub fn to_price(&self) -> TreasuryPrice {
        // parse() and from_price() only build in-range notations
        self.checked_price().unwrap_or(TreasuryPrice::ZERO)
    }

    /// Decimal value: `whole + 32nds/32 + tag/256`
    pub fn to_f64(&self) -> f64 {
        self.to_price().to_f64()
    }
}

impl fmt::Display for FractionalNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{:02}{}",
            self.whole, HANDLE_SEPARATOR, self.thirty_seconds, self.tag
        )
    }
}

impl FromStr for FractionalNotation {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<TreasuryPrice> for FractionalNotation {
    fn from(price: TreasuryPrice) -> Self {
        Self::from_price(price)
    }
}

/// Serialized as the quote text so feed rows carry `"100-25+"`
impl Serialize for FractionalNotation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FractionalNotation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Encode a decimal price as handle-and-fraction notation
///
/// # Examples
/// ```
/// assert_eq!(codec::encode(100.00390625).unwrap().to_string(), "100-001");
/// assert_eq!(codec::encode(100.796875).unwrap().to_string(), "100-25+");
/// assert_eq!(codec::encode(100.0).unwrap().to_string(), "100-00");
/// assert!(codec::encode(100.001).is_err());
/// ```
pub fn encode(decimal: f64) -> CodecResult<FractionalNotation> {
    let price = TreasuryPrice::try_from_f64(decimal)?;
    Ok(FractionalNotation::from_price(price))
}

/// Encode an already grid-exact price (infallible)
pub fn encode_price(price: TreasuryPrice) -> FractionalNotation {
    FractionalNotation::from_price(price)
}

/// Decode handle-and-fraction notation to a decimal price
///
/// # Examples
/// ```
/// assert_eq!(codec::decode("100-001").unwrap(), 100.00390625);
/// assert_eq!(codec::decode("100-25+").unwrap(), 100.796875);
/// assert!(codec::decode("100.5").is_err());
/// ```
pub fn decode(notation: &str) -> CodecResult<f64> {
    Ok(FractionalNotation::parse(notation)?.to_f64())
}

/// Decode handle-and-fraction notation to an exact grid price
pub fn decode_price(notation: &str) -> CodecResult<TreasuryPrice> {
    Ok(FractionalNotation::parse(notation)?.to_price())
}
