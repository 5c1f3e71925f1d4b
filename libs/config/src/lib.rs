//! # Feed Generator Configuration
//!
//! This crate provides centralized configuration for the fixture feed
//! generator, so every oscillator bound, book depth and output setting lives
//! in one validated structure instead of scattered literals.
//!
//! ## Features
//!
//! - **Defaults**: the canonical fixture set (seven on-the-run tenors, 99–101 handles)
//! - **Layering**: TOML file, then `FEEDGEN__`-prefixed environment variables
//! - **Validation**: bounds ordering, 1/256 grid alignment, non-empty lists
//!
//! ## Usage
//!
//! ```rust
//! use feed_config::FeedConfig;
//!
//! let config = FeedConfig::from_toml_str("[market_data]\nlevels = 3").unwrap();
//! assert_eq!(config.market_data.levels, 3);
//! assert_eq!(config.market_data.updates, 1000);
//! ```

pub mod feed_config;

// Re-export commonly used types
pub use feed_config::{
    load_config, FeedConfig, InquiryFeedConfig, MarketDataConfig, OutputConfig, OutputFormat,
    PriceFeedConfig, SpreadResetRule, TradeFeedConfig, UniverseConfig,
};
