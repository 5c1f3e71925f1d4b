//! Grid Precision for US Treasury Prices
//!
//! Treasury cash prices are quoted in points, 32nds of a point, and eighths of
//! a 32nd. The smallest increment is therefore 1/256 of a point, and every
//! price in the fixture feeds must sit exactly on that grid.
//!
//! ## Grid Layout
//!
//! ```text
//! 1 point      = 32 thirty-seconds = 256 ticks
//! 1 32nd       = 8 ticks
//! half a 32nd  = 4 ticks             (quoted with the "+" sigil)
//! ```
//!
//! ## Floating-Point Boundary
//!
//! Oscillators and configuration work with `f64`, which represents every grid
//! value below 2^45 points exactly. Conversion into [`TreasuryPrice`] happens
//! once, at the codec boundary, and accepts at most [`GRID_TOLERANCE`] ticks of
//! drift before rejecting the value as off-grid.
//!
//! [`TreasuryPrice`]: crate::TreasuryPrice

/// Ticks (1/256ths) in one whole point
pub const TICKS_PER_POINT: u64 = 256;

/// Thirty-seconds in one whole point
pub const THIRTY_SECONDS_PER_POINT: u64 = 32;

/// Ticks in one 32nd
pub const TICKS_PER_THIRTY_SECOND: u64 = TICKS_PER_POINT / THIRTY_SECONDS_PER_POINT;

/// Tick remainder quoted as "+" instead of a digit
pub const HALF_THIRTY_SECOND_TICKS: u64 = TICKS_PER_THIRTY_SECOND / 2;

/// Size of one tick as a decimal
pub const TICK_SIZE: f64 = 1.0 / TICKS_PER_POINT as f64;

/// Maximum distance, in ticks, a scaled value may sit from the grid
pub const GRID_TOLERANCE: f64 = 1e-6;

/// Largest tick count whose decimal value `f64` still represents exactly (2^53)
pub const MAX_EXACT_TICKS: u64 = 1 << 53;

/// Scale a decimal value into (possibly fractional) ticks
#[inline]
pub fn to_ticks(value: f64) -> f64 {
    value * TICKS_PER_POINT as f64
}

/// Whether a decimal value lies on the 1/256 grid within [`GRID_TOLERANCE`]
pub fn is_on_grid(value: f64) -> bool {
    if !value.is_finite() {
        return false;
    }
    let scaled = to_ticks(value);
    (scaled - scaled.round()).abs() <= GRID_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_constants() {
        assert_eq!(TICKS_PER_THIRTY_SECOND, 8);
        assert_eq!(HALF_THIRTY_SECOND_TICKS, 4);
        assert_eq!(TICK_SIZE, 0.00390625);
    }

    #[test]
    fn test_is_on_grid() {
        assert!(is_on_grid(100.0));
        assert!(is_on_grid(100.00390625));
        assert!(is_on_grid(100.796875));
        assert!(!is_on_grid(100.001));
        assert!(!is_on_grid(f64::NAN));
        assert!(!is_on_grid(f64::INFINITY));
    }
}
