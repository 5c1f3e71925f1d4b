//! Depth expansion of a single mid/spread sample

use crate::error::{GeneratorError, GeneratorResult};
use types::BookLevel;

/// Fans one `(mid, top_spread)` sample out into `levels` book tiers
///
/// Level `l` (1-based) quotes the same mid with spread
/// `top_spread + (l - 1) * spread_increment` and `l * size_multiplier` on
/// both sides, so deeper levels are wider and larger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderBookLevelExpander {
    levels: u32,
    spread_increment: f64,
    size_multiplier: u64,
}

impl OrderBookLevelExpander {
    pub fn new(levels: u32, spread_increment: f64, size_multiplier: u64) -> GeneratorResult<Self> {
        if levels < 1 {
            return Err(GeneratorError::precondition("order book needs at least one level"));
        }
        if !(spread_increment.is_finite() && spread_increment > 0.0) {
            return Err(GeneratorError::precondition(format!(
                "level spread increment must be positive, got {}",
                spread_increment
            )));
        }
        if size_multiplier == 0 {
            return Err(GeneratorError::precondition("size multiplier must be positive"));
        }
        if u64::from(levels).checked_mul(size_multiplier).is_none() {
            return Err(GeneratorError::precondition(format!(
                "{} levels of {} overflow the size range",
                levels, size_multiplier
            )));
        }
        Ok(Self {
            levels,
            spread_increment,
            size_multiplier,
        })
    }

    pub fn levels(&self) -> u32 {
        self.levels
    }

    /// Book tiers for one sample, top of book first
    pub fn expand(&self, mid: f64, top_spread: f64) -> Vec<BookLevel> {
        (1..=self.levels)
            .map(|level| {
                // bounded by the overflow check in new()
                let size = u64::from(level) * self.size_multiplier;
                BookLevel {
                    level,
                    price: mid,
                    spread: top_spread + f64::from(level - 1) * self.spread_increment,
                    bid_size: size,
                    offer_size: size,
                }
            })
            .collect()
    }
}
