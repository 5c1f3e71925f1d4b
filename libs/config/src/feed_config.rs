//! Feed Configuration Module
//!
//! Provides configuration loading for the fixture feed generator.
//! Built-in defaults reproduce the desk's canonical fixture set; a TOML file
//! and `FEEDGEN__`-prefixed environment variables override them in that order.

use anyhow::{ensure, Context, Result};
use config_crate::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use types::precision::{is_on_grid, TICK_SIZE};
use types::{reference, Instrument};

/// Environment variable prefix (`FEEDGEN__MARKET_DATA__LEVELS=3`)
pub const ENV_PREFIX: &str = "FEEDGEN";

/// Separator between prefix and nested keys in environment variables
pub const ENV_SEPARATOR: &str = "__";

/// Main feed configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct FeedConfig {
    /// Seed for the randomized trade and inquiry fields
    pub seed: u64,

    /// Instruments to generate, in output order
    pub universe: UniverseConfig,

    /// Flat reference-price feed (prices.txt)
    pub prices: PriceFeedConfig,

    /// Leveled order-book feed (marketdata.txt)
    pub market_data: MarketDataConfig,

    /// Booked trades feed (trades.txt)
    pub trades: TradeFeedConfig,

    /// Client inquiries feed (inquiries.txt)
    pub inquiries: InquiryFeedConfig,

    /// Where and how feeds are written
    pub output: OutputConfig,
}

/// Instrument universe
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct UniverseConfig {
    pub instruments: Vec<String>,
}

/// Reference-price feed: tiled triangle waves for price and spread
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PriceFeedConfig {
    pub samples: usize,
    pub price_start: f64,
    pub price_end: f64,
    pub price_step: f64,
    pub spread_min: f64,
    pub spread_max: f64,
    pub spread_step: f64,
}

/// How the sawtooth spread leaves its maximum
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpreadResetRule {
    /// Reach the maximum, hold it one extra tick, then reset
    #[default]
    HoldAtMax,
    /// Compare the just-emitted value against the reset value before widening
    CompareLastEmitted,
}

/// Order-book feed: reflecting mids, sawtooth spreads, expanded depth
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct MarketDataConfig {
    pub updates: usize,
    pub mid_start: f64,
    pub mid_end: f64,
    pub mid_step: f64,
    pub spread_start: f64,
    /// Widening per tick and per depth level
    pub spread_increment: f64,
    pub spread_max: f64,
    pub spread_reset: f64,
    pub reset_rule: SpreadResetRule,
    pub levels: u32,
    pub size_multiplier: u64,
}

/// Trade feed
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct TradeFeedConfig {
    pub per_instrument: usize,
    pub books: Vec<String>,
    /// Cycled in order per instrument
    pub quantities: Vec<u64>,
    pub buy_price: f64,
    pub sell_price: f64,
    pub trade_id_length: usize,
}

/// Inquiry feed
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct InquiryFeedConfig {
    pub per_instrument: usize,
    pub quantity_min: u64,
    pub quantity_max: u64,
    pub quantity_step: u64,
    pub handle_min: u64,
    pub handle_max: u64,
}

/// Serialization format of the written feeds
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Delimited text, one record per line, no header
    #[default]
    Csv,
    /// One JSON array of records per feed
    Json,
}

/// Output settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub format: OutputFormat,
    /// Single ASCII character
    pub delimiter: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            universe: UniverseConfig::default(),
            prices: PriceFeedConfig::default(),
            market_data: MarketDataConfig::default(),
            trades: TradeFeedConfig::default(),
            inquiries: InquiryFeedConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            instruments: reference::default_universe()
                .into_iter()
                .map(|i| i.to_string())
                .collect(),
        }
    }
}

impl Default for PriceFeedConfig {
    fn default() -> Self {
        Self {
            samples: 1000,
            price_start: 99.0,
            price_end: 101.0,
            price_step: TICK_SIZE,
            spread_min: 1.0 / 128.0,
            spread_max: 1.0 / 64.0,
            spread_step: TICK_SIZE,
        }
    }
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            updates: 1000,
            mid_start: 99.0,
            mid_end: 101.0,
            mid_step: TICK_SIZE,
            spread_start: 1.0 / 128.0,
            spread_increment: 1.0 / 128.0,
            spread_max: 1.0 / 32.0,
            spread_reset: 1.0 / 128.0,
            reset_rule: SpreadResetRule::default(),
            levels: 5,
            size_multiplier: 10_000_000,
        }
    }
}

impl Default for TradeFeedConfig {
    fn default() -> Self {
        Self {
            per_instrument: 10,
            books: vec!["TRSY1".into(), "TRSY2".into(), "TRSY3".into()],
            quantities: vec![1_000_000, 2_000_000, 3_000_000, 4_000_000, 5_000_000],
            buy_price: 99.0,
            sell_price: 100.0,
            trade_id_length: 10,
        }
    }
}

impl Default for InquiryFeedConfig {
    fn default() -> Self {
        Self {
            per_instrument: 10,
            quantity_min: 100_000,
            quantity_max: 200_000,
            quantity_step: 1_000,
            handle_min: 99,
            handle_max: 101,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            format: OutputFormat::Csv,
            delimiter: ",".to_string(),
        }
    }
}

impl FeedConfig {
    /// Load configuration: defaults, then optional TOML file, then environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            info!("Loading feed config: {:?}", path);
            builder = builder.add_source(File::from(path).required(true));
        }

        // Override with environment variables (FEEDGEN__ prefix)
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("universe.instruments")
                .with_list_parse_key("trades.books")
                .with_list_parse_key("trades.quantities"),
        );

        let config = builder.build().context("Failed to build configuration")?;
        Self::finish(config)
    }

    /// Load defaults overlaid with a TOML document, ignoring the environment
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()
            .context("Failed to build configuration")?;
        Self::finish(config)
    }

    fn finish(config: Config) -> Result<Self> {
        let mut feed: FeedConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        feed.expand_env_vars()?;
        feed.validate()?;
        debug!("Feed config resolved: {:?}", feed);
        Ok(feed)
    }

    /// Expand `~` and `$VAR` in the output directory
    pub fn expand_env_vars(&mut self) -> Result<()> {
        let raw = self.output.dir.to_string_lossy().into_owned();
        let expanded = shellexpand::full(&raw).context("Failed to expand output directory")?;
        self.output.dir = PathBuf::from(expanded.as_ref());
        Ok(())
    }

    /// Parsed instrument universe, in configured order
    pub fn instruments(&self) -> Result<Vec<Instrument>> {
        self.universe
            .instruments
            .iter()
            .map(|label| {
                Instrument::new(label.as_str())
                    .with_context(|| format!("Invalid instrument in universe: {:?}", label))
            })
            .collect()
    }

    /// Output delimiter as a single byte
    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.output.delimiter.as_bytes() {
            [byte] if byte.is_ascii() && !byte.is_ascii_alphanumeric() => Ok(*byte),
            _ => anyhow::bail!(
                "output.delimiter must be one ASCII punctuation or whitespace character, got {:?}",
                self.output.delimiter
            ),
        }
    }

    /// Cross-field validation of every section
    pub fn validate(&self) -> Result<()> {
        let instruments = self.instruments()?;
        ensure!(!instruments.is_empty(), "universe.instruments must not be empty");
        for instrument in &instruments {
            if reference::lookup(instrument.as_str()).is_none() {
                warn!("Instrument {} is not an on-the-run Treasury tenor", instrument);
            }
        }

        let p = &self.prices;
        ensure!(p.samples > 0, "prices.samples must be positive");
        check_ramp("prices.price", p.price_start, p.price_end, p.price_step)?;
        check_grid("prices.price_start", p.price_start)?;
        check_grid("prices.price_end", p.price_end)?;
        check_grid("prices.price_step", p.price_step)?;
        check_ramp("prices.spread", p.spread_min, p.spread_max, p.spread_step)?;

        let m = &self.market_data;
        ensure!(m.updates > 0, "market_data.updates must be positive");
        check_ramp("market_data.mid", m.mid_start, m.mid_end, m.mid_step)?;
        check_grid("market_data.mid_start", m.mid_start)?;
        check_grid("market_data.mid_end", m.mid_end)?;
        check_grid("market_data.mid_step", m.mid_step)?;
        ensure!(
            m.spread_increment > 0.0 && m.spread_increment.is_finite(),
            "market_data.spread_increment must be positive, got {}",
            m.spread_increment
        );
        ensure!(
            m.spread_start >= 0.0 && m.spread_reset >= 0.0,
            "market_data spreads must be non-negative"
        );
        ensure!(
            m.spread_max >= m.spread_start,
            "market_data.spread_max ({}) must be >= spread_start ({})",
            m.spread_max,
            m.spread_start
        );
        ensure!(m.levels >= 1, "market_data.levels must be at least 1");
        ensure!(m.size_multiplier > 0, "market_data.size_multiplier must be positive");

        let t = &self.trades;
        ensure!(!t.books.is_empty(), "trades.books must not be empty");
        ensure!(!t.quantities.is_empty(), "trades.quantities must not be empty");
        ensure!(t.trade_id_length > 0, "trades.trade_id_length must be positive");
        check_grid("trades.buy_price", t.buy_price)?;
        check_grid("trades.sell_price", t.sell_price)?;

        let q = &self.inquiries;
        ensure!(q.quantity_step > 0, "inquiries.quantity_step must be positive");
        ensure!(
            q.quantity_min <= q.quantity_max,
            "inquiries.quantity_min ({}) must be <= quantity_max ({})",
            q.quantity_min,
            q.quantity_max
        );
        ensure!(
            q.handle_min <= q.handle_max,
            "inquiries.handle_min ({}) must be <= handle_max ({})",
            q.handle_min,
            q.handle_max
        );

        self.delimiter_byte()?;
        Ok(())
    }

    /// Render the resolved configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

fn check_ramp(name: &str, start: f64, end: f64, step: f64) -> Result<()> {
    ensure!(
        start.is_finite() && end.is_finite() && step.is_finite(),
        "{} bounds and step must be finite",
        name
    );
    ensure!(start < end, "{}: start ({}) must be < end ({})", name, start, end);
    ensure!(step > 0.0, "{}: step must be positive, got {}", name, step);
    ensure!(
        step <= end - start,
        "{}: step ({}) must not exceed the range ({})",
        name,
        step,
        end - start
    );
    Ok(())
}

fn check_grid(name: &str, value: f64) -> Result<()> {
    ensure!(
        is_on_grid(value),
        "{} ({}) must be a multiple of 1/256",
        name,
        value
    );
    Ok(())
}

/// Convenience function to load configuration with defaults
pub fn load_config(path: Option<&Path>) -> Result<FeedConfig> {
    FeedConfig::load(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_are_valid() {
        let config = FeedConfig::default();
        config.validate().unwrap();
        assert_eq!(config.universe.instruments.len(), 7);
        assert_eq!(config.market_data.levels, 5);
        assert_eq!(config.prices.price_step, 0.00390625);
        assert_eq!(config.delimiter_byte().unwrap(), b',');
    }

    #[test]
    fn test_load_file_overrides_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("feeds.toml");

        let config_content = r#"
seed = 7

[universe]
instruments = ["2Y", "10Y"]

[market_data]
levels = 3
reset_rule = "compare_last_emitted"

[output]
format = "json"
delimiter = "|"
"#;

        fs::write(&config_path, config_content).unwrap();

        let config = FeedConfig::load(Some(&config_path)).unwrap();

        assert_eq!(config.seed, 7);
        assert_eq!(config.universe.instruments, vec!["2Y", "10Y"]);
        assert_eq!(config.market_data.levels, 3);
        assert_eq!(config.market_data.reset_rule, SpreadResetRule::CompareLastEmitted);
        // Untouched keys keep their defaults
        assert_eq!(config.market_data.size_multiplier, 10_000_000);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.delimiter_byte().unwrap(), b'|');
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(FeedConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn test_validation_rejects_bad_sections() {
        let cases = [
            "[universe]\ninstruments = []",
            "[universe]\ninstruments = [\"\"]",
            "[prices]\nprice_start = 101.0\nprice_end = 99.0",
            "[prices]\nprice_step = 0.0",
            "[prices]\nprice_start = 99.001",
            "[market_data]\nlevels = 0",
            "[market_data]\nspread_increment = 0.0",
            "[trades]\nbooks = []",
            "[inquiries]\nquantity_min = 5\nquantity_max = 1",
            "[output]\ndelimiter = \"ab\"",
        ];
        for case in cases {
            assert!(
                FeedConfig::from_toml_str(case).is_err(),
                "expected validation failure for {:?}",
                case
            );
        }
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = FeedConfig::default();
        let rendered = config.to_toml().unwrap();
        let reparsed = FeedConfig::from_toml_str(&rendered).unwrap();
        assert_eq!(reparsed, config);
    }
}
