//! # Treasury Fixture Types
//!
//! Shared data model for the synthetic US Treasury feeds: reference prices,
//! trades, leveled order books and client inquiries.
//!
//! ## Design Philosophy
//!
//! - **Grid-Exact Prices**: [`TreasuryPrice`] stores whole 1/256 ticks, never a float
//! - **Explicit Boundary**: `f64` values from the oscillators enter the grid through
//!   one checked conversion
//! - **Type Safety**: [`TradeId`] and [`InquiryId`] cannot be swapped; tenor parsing
//!   never invents a default
//!
//! ## Quick Start
//!
//! ```rust
//! use types::{Instrument, Tenor, TreasuryPrice};
//!
//! let price = TreasuryPrice::try_from_f64(100.796875).unwrap();
//! assert_eq!((price.whole(), price.thirty_seconds(), price.eighths()), (100, 25, 4));
//!
//! let ten_year = Instrument::new("10Y").unwrap();
//! assert_eq!(ten_year.tenor().unwrap(), Tenor::years(10));
//! ```
//!
//! ## Integration Points
//!
//! - **codec**: renders [`TreasuryPrice`] as handle-and-fraction notation
//! - **feed-generator**: builds [`BookLevel`]s and feed rows from these types

pub mod common;
pub mod market;
pub mod precision;
pub mod reference;

pub use common::errors::{PriceError, ValidationError};
pub use common::fixed_point::TreasuryPrice;
pub use common::identifiers::{InquiryId, Instrument, Tenor, TradeId};
pub use market::{BookLevel, Side};
pub use reference::{default_universe, OnTheRunTreasury};
