//! Grid-exact Treasury price type
//!
//! [`TreasuryPrice`] stores a non-negative price as an integer number of
//! 1/256-point ticks, so the handle, the 32nds and the eighth-of-a-32nd
//! remainder are plain integer divisions instead of floating-point guesses.
//!
//! ## Design Principles
//!
//! - **No Precision Loss**: values stored as whole ticks
//! - **Strict Boundary**: `f64` input must already sit on the grid (within 1e-6 ticks)
//! - **Exact Decimal Output**: 1/256 has an 8-digit decimal expansion, so
//!   [`TreasuryPrice::to_decimal`] never rounds

use crate::common::errors::PriceError;
use crate::precision::{
    to_ticks, GRID_TOLERANCE, MAX_EXACT_TICKS, THIRTY_SECONDS_PER_POINT, TICKS_PER_POINT,
    TICKS_PER_THIRTY_SECOND,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Decimal value of one tick scaled by 10^8 (1/256 = 0.00390625)
const TICK_DECIMAL_MANTISSA: i128 = 390_625;
const TICK_DECIMAL_SCALE: u32 = 8;

/// Non-negative price on the 1/256 grid
///
/// Examples:
/// - 100.0        = TreasuryPrice(25_600)
/// - 100.00390625 = TreasuryPrice(25_601)  (quoted "100-001")
/// - 100.796875   = TreasuryPrice(25_804)  (quoted "100-25+")
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TreasuryPrice(u64);

impl TreasuryPrice {
    /// Zero points
    pub const ZERO: Self = Self(0);

    /// One whole point (par increment)
    pub const ONE_POINT: Self = Self(TICKS_PER_POINT);

    /// Create from a raw tick count
    #[inline]
    pub const fn from_ticks(ticks: u64) -> Self {
        Self(ticks)
    }

    /// Create from handle, 32nds and eighths-of-a-32nd
    ///
    /// Returns `None` when `thirty_seconds > 31`, `eighths > 7`, or the
    /// result would exceed the exactly representable range.
    pub fn from_parts(whole: u64, thirty_seconds: u64, eighths: u64) -> Option<Self> {
        if thirty_seconds >= THIRTY_SECONDS_PER_POINT || eighths >= TICKS_PER_THIRTY_SECOND {
            return None;
        }
        let ticks = whole
            .checked_mul(TICKS_PER_POINT)?
            .checked_add(thirty_seconds * TICKS_PER_THIRTY_SECOND + eighths)?;
        (ticks <= MAX_EXACT_TICKS).then_some(Self(ticks))
    }

    /// Create from an `f64` that must already lie on the grid
    ///
    /// Rejects NaN/infinity, negative values, values further than
    /// [`GRID_TOLERANCE`] ticks from the grid, and values beyond 2^53 ticks.
    /// Values within tolerance snap to the nearest tick.
    ///
    /// # Examples
    /// ```
    /// use types::TreasuryPrice;
    ///
    /// let price = TreasuryPrice::try_from_f64(100.796875).unwrap();
    /// assert_eq!(price.ticks(), 25_804);
    /// assert!(TreasuryPrice::try_from_f64(100.001).is_err());
    /// ```
    pub fn try_from_f64(value: f64) -> Result<Self, PriceError> {
        if !value.is_finite() {
            return Err(PriceError::NotFinite { value });
        }
        if value < 0.0 {
            return Err(PriceError::Negative { value });
        }

        let scaled = to_ticks(value);
        if scaled > MAX_EXACT_TICKS as f64 {
            return Err(PriceError::Overflow { value });
        }

        let nearest = scaled.round();
        if (scaled - nearest).abs() > GRID_TOLERANCE {
            return Err(PriceError::OffGrid {
                value,
                ticks: scaled,
            });
        }

        Ok(Self(nearest as u64))
    }

    /// Create from a decimal string with exact parsing
    ///
    /// Unlike [`TreasuryPrice::try_from_f64`] there is no tolerance: the
    /// decimal must be an exact multiple of 1/256.
    pub fn from_decimal_str(s: &str) -> Result<Self, PriceError> {
        let decimal = Decimal::from_str(s.trim()).map_err(|_| PriceError::invalid_decimal(s))?;
        Self::try_from_decimal(decimal)
    }

    /// Create from an exact decimal
    pub fn try_from_decimal(decimal: Decimal) -> Result<Self, PriceError> {
        let as_f64 = decimal.to_f64().unwrap_or(f64::NAN);
        if decimal.is_sign_negative() && !decimal.is_zero() {
            return Err(PriceError::Negative { value: as_f64 });
        }

        let scaled = decimal
            .checked_mul(Decimal::from(TICKS_PER_POINT))
            .ok_or(PriceError::Overflow { value: as_f64 })?;
        if !scaled.fract().is_zero() {
            return Err(PriceError::OffGrid {
                value: as_f64,
                ticks: scaled.to_f64().unwrap_or(f64::NAN),
            });
        }

        match scaled.to_u64() {
            Some(ticks) if ticks <= MAX_EXACT_TICKS => Ok(Self(ticks)),
            _ => Err(PriceError::Overflow { value: as_f64 }),
        }
    }

    /// Raw tick count
    #[inline]
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Whole points (the "handle")
    #[inline]
    pub const fn whole(self) -> u64 {
        self.0 / TICKS_PER_POINT
    }

    /// 32nds within the point, `0..=31`
    #[inline]
    pub const fn thirty_seconds(self) -> u64 {
        (self.0 % TICKS_PER_POINT) / TICKS_PER_THIRTY_SECOND
    }

    /// Eighths of a 32nd (256ths remainder), `0..=7`
    #[inline]
    pub const fn eighths(self) -> u64 {
        self.0 % TICKS_PER_THIRTY_SECOND
    }

    /// Convert to f64. Exact for every value this type can hold.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / TICKS_PER_POINT as f64
    }

    /// Convert to an exact, normalized decimal
    pub fn to_decimal(self) -> Decimal {
        Decimal::from_i128_with_scale(self.0 as i128 * TICK_DECIMAL_MANTISSA, TICK_DECIMAL_SCALE)
            .normalize()
    }

    /// Checked addition - returns None past the exact range
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0
            .checked_add(rhs.0)
            .filter(|ticks| *ticks <= MAX_EXACT_TICKS)
            .map(Self)
    }

    /// Checked subtraction - returns None below zero
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }
}

/// Displays the exact decimal value; the 32nds notation lives in the codec
impl fmt::Display for TreasuryPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl TryFrom<f64> for TreasuryPrice {
    type Error = PriceError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_from_f64(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_treasury_price_creation() {
        let price = TreasuryPrice::try_from_f64(100.00390625).unwrap();
        assert_eq!(price.ticks(), 25_601);
        assert_eq!(price.whole(), 100);
        assert_eq!(price.thirty_seconds(), 0);
        assert_eq!(price.eighths(), 1);

        let plus = TreasuryPrice::try_from_f64(100.796875).unwrap();
        assert_eq!(plus.whole(), 100);
        assert_eq!(plus.thirty_seconds(), 25);
        assert_eq!(plus.eighths(), 4);
    }

    #[test]
    fn test_from_parts() {
        let price = TreasuryPrice::from_parts(99, 31, 7).unwrap();
        assert_eq!(price.ticks(), 99 * 256 + 255);
        assert!(TreasuryPrice::from_parts(99, 32, 0).is_none());
        assert!(TreasuryPrice::from_parts(99, 0, 8).is_none());
        assert!(TreasuryPrice::from_parts(u64::MAX, 0, 0).is_none());
    }

    #[test]
    fn test_snaps_within_tolerance() {
        let drifted = 100.0 + 1e-12;
        assert_eq!(TreasuryPrice::try_from_f64(drifted).unwrap().ticks(), 25_600);
    }

    #[test]
    fn test_error_handling() {
        assert!(matches!(
            TreasuryPrice::try_from_f64(f64::NAN),
            Err(PriceError::NotFinite { .. })
        ));
        assert!(matches!(
            TreasuryPrice::try_from_f64(-0.5),
            Err(PriceError::Negative { .. })
        ));
        assert!(matches!(
            TreasuryPrice::try_from_f64(100.001),
            Err(PriceError::OffGrid { .. })
        ));
        assert!(matches!(
            TreasuryPrice::try_from_f64(1e300),
            Err(PriceError::Overflow { .. })
        ));
    }

    #[test]
    fn test_decimal_round_trip() {
        let price = TreasuryPrice::from_decimal_str("100.796875").unwrap();
        assert_eq!(price.ticks(), 25_804);
        assert_eq!(price.to_decimal(), dec!(100.796875));
        assert_eq!(price.to_string(), "100.796875");
        assert_eq!(TreasuryPrice::from_ticks(25_600).to_string(), "100");

        assert!(matches!(
            TreasuryPrice::from_decimal_str("100.001"),
            Err(PriceError::OffGrid { .. })
        ));
        assert!(matches!(
            TreasuryPrice::from_decimal_str("abc"),
            Err(PriceError::InvalidDecimal { .. })
        ));
        assert!(matches!(
            TreasuryPrice::from_decimal_str("-1"),
            Err(PriceError::Negative { .. })
        ));
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = TreasuryPrice::ONE_POINT;
        let b = TreasuryPrice::from_ticks(4);
        assert_eq!(a.checked_add(b).unwrap().ticks(), 260);
        assert_eq!(a.checked_sub(b).unwrap().ticks(), 252);
        assert!(b.checked_sub(a).is_none());
    }
}
