//! # Feed Generator - Treasury fixture feeds
//!
//! Deterministic synthetic data for exercising a Treasury trading stack:
//!
//! - `prices`: tiled price and spread triangle waves per instrument
//! - `marketdata`: reflecting mids with a sawtooth spread, expanded to
//!   several book levels and interleaved across the curve per update
//! - `trades`: alternating buys and sells with cycled quantities
//! - `inquiries`: random client requests for quote
//!
//! Prices are written in handle-and-fraction notation (`100-25+`) via the
//! `codec` crate. Every random draw goes through an injectable
//! [`RandomSource`], so a fixed seed reproduces a run byte for byte.
//!
//! ## Example
//!
//! ```rust
//! use feed_generator::{OscillatorConfig, PriceOscillator};
//!
//! let mids = PriceOscillator::reflecting(OscillatorConfig::new(99.0, 101.0, 1.0 / 256.0, 3))?;
//! let first: Vec<f64> = mids.samples().collect();
//! assert_eq!(first, vec![99.0, 99.00390625, 99.0078125]);
//! # Ok::<(), feed_generator::GeneratorError>(())
//! ```

pub mod book;
pub mod error;
pub mod feeds;
pub mod generator;
pub mod oscillator;
pub mod randomness;
pub mod records;
pub mod sink;

pub use book::OrderBookLevelExpander;
pub use error::{GeneratorError, GeneratorResult};
pub use generator::{FeedGenerator, FeedSummary};
pub use oscillator::{
    Direction, OscillationMode, OscillationState, OscillatorConfig, PriceOscillator,
    SpreadConfig, SpreadOscillator,
};
pub use randomness::{RandomSource, SeededRandom};
pub use records::{FeedKind, InquiryRecord, MarketDataRecord, PriceRecord, TradeRecord};
pub use sink::FeedSink;
