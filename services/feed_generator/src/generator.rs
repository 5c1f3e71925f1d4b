//! Run orchestration: config in, feed files out

use crate::error::GeneratorResult;
use crate::feeds;
use crate::randomness::SeededRandom;
use crate::records::{FeedKind, InquiryRecord, MarketDataRecord, PriceRecord, TradeRecord};
use crate::sink::FeedSink;
use feed_config::FeedConfig;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use types::Instrument;

/// Outcome of writing one feed
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSummary {
    pub kind: FeedKind,
    pub rows: usize,
    pub path: PathBuf,
}

/// Builds feeds from a resolved [`FeedConfig`]
///
/// Random feeds draw from per-feed streams derived from `config.seed`, so a
/// run that writes only trades produces the same trades as a full run.
#[derive(Debug, Clone)]
pub struct FeedGenerator {
    config: FeedConfig,
    instruments: Vec<Instrument>,
}

impl FeedGenerator {
    pub fn new(config: FeedConfig) -> anyhow::Result<Self> {
        let instruments = config.instruments()?;
        Ok(Self {
            config,
            instruments,
        })
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    pub fn prices(&self) -> GeneratorResult<Vec<PriceRecord>> {
        feeds::build_prices(&self.instruments, &self.config.prices)
    }

    pub fn market_data(&self) -> GeneratorResult<Vec<MarketDataRecord>> {
        feeds::build_market_data(&self.instruments, &self.config.market_data)
    }

    pub fn trades(&self) -> GeneratorResult<Vec<TradeRecord>> {
        let mut rng = self.stream(FeedKind::Trades);
        feeds::build_trades(&self.instruments, &self.config.trades, &mut rng)
    }

    pub fn inquiries(&self) -> GeneratorResult<Vec<InquiryRecord>> {
        let mut rng = self.stream(FeedKind::Inquiries);
        feeds::build_inquiries(&self.instruments, &self.config.inquiries, &mut rng)
    }

    fn stream(&self, kind: FeedKind) -> SeededRandom {
        SeededRandom::for_stream(self.config.seed, kind.file_stem())
    }

    /// Build and write one feed
    pub fn write_feed(&self, kind: FeedKind, sink: &FeedSink) -> GeneratorResult<FeedSummary> {
        let started = Instant::now();
        let (rows, path) = match kind {
            FeedKind::Prices => {
                let rows = self.prices()?;
                (rows.len(), sink.write(kind, &rows)?)
            }
            FeedKind::Trades => {
                let rows = self.trades()?;
                (rows.len(), sink.write(kind, &rows)?)
            }
            FeedKind::MarketData => {
                let rows = self.market_data()?;
                (rows.len(), sink.write(kind, &rows)?)
            }
            FeedKind::Inquiries => {
                let rows = self.inquiries()?;
                (rows.len(), sink.write(kind, &rows)?)
            }
        };
        info!(
            feed = %kind,
            rows,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Feed complete"
        );
        Ok(FeedSummary { kind, rows, path })
    }

    /// Build and write each requested feed, in the order given
    pub fn write_all(
        &self,
        kinds: &[FeedKind],
        sink: &FeedSink,
    ) -> GeneratorResult<Vec<FeedSummary>> {
        kinds.iter().map(|kind| self.write_feed(*kind, sink)).collect()
    }
}
