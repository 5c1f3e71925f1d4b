//! End-to-End Test Framework for the fixture feed generator
//!
//! Runs the generator into a scratch directory exactly as the CLI does and
//! validates the files a downstream consumer would read.

pub mod framework;
pub mod validation;

pub use framework::{FeedRun, TestConfig};
pub use validation::{check_market_data_order, FeedFileValidator, ParsedRow};
