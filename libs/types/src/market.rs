//! Market-side value types shared by the feed builders
//!
//! [`BookLevel`] is produced transiently by the order-book expansion step for
//! each instrument and update tick; nothing here is persisted.

use crate::common::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a trade or client inquiry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Both sides in the order trade flow alternates through
    pub const ALL: [Side; 2] = [Side::Buy, Side::Sell];

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            other => Err(ValidationError::InvalidSide {
                input: other.to_string(),
            }),
        }
    }
}

/// One depth tier of a quoted book
///
/// `price` is the oscillated mid shared by every level of the same tick;
/// `spread` widens with depth and sizes scale linearly with `level`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BookLevel {
    /// 1-based depth index (1 = top of book)
    pub level: u32,
    pub price: f64,
    pub spread: f64,
    pub bid_size: u64,
    pub offer_size: u64,
}

impl BookLevel {
    /// Bid side price implied by the mid and this level's spread
    pub fn bid_price(&self) -> f64 {
        self.price - self.spread
    }

    /// Offer side price implied by the mid and this level's spread
    pub fn offer_price(&self) -> f64 {
        self.price + self.spread
    }
}
