//! Scratch-directory runs of the generator

use anyhow::{Context, Result};
use feed_config::{FeedConfig, OutputFormat};
use feed_generator::{FeedGenerator, FeedKind, FeedSink, FeedSummary};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use tracing::info;

/// Knobs for a test run on top of the desk defaults
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub feed: FeedConfig,
    pub kinds: Vec<FeedKind>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            feed: FeedConfig::default(),
            kinds: FeedKind::ALL.to_vec(),
        }
    }
}

impl TestConfig {
    /// Defaults shrunk so a full run stays fast
    pub fn small() -> Self {
        let mut feed = FeedConfig::default();
        feed.prices.samples = 64;
        feed.market_data.updates = 32;
        Self {
            feed,
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.feed.output.format = format;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.feed.seed = seed;
        self
    }
}

/// Completed run; the scratch directory lives as long as this value
pub struct FeedRun {
    dir: TempDir,
    sink: FeedSink,
    pub summaries: Vec<FeedSummary>,
}

impl FeedRun {
    pub fn execute(mut config: TestConfig) -> Result<Self> {
        let dir = tempfile::tempdir().context("Failed to create scratch directory")?;
        config.feed.output.dir = dir.path().to_path_buf();
        config.feed.validate()?;

        let sink = FeedSink::from_config(&config.feed.output, config.feed.delimiter_byte()?);
        let generator = FeedGenerator::new(config.feed)?;
        let summaries = generator.write_all(&config.kinds, &sink)?;
        info!("Test run wrote {} feed(s) to {:?}", summaries.len(), dir.path());

        Ok(Self {
            dir,
            sink,
            summaries,
        })
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn contents(&self, kind: FeedKind) -> Result<String> {
        let path = self.sink.path_for(kind);
        fs::read_to_string(&path).with_context(|| format!("Failed to read {:?}", path))
    }

    pub fn lines(&self, kind: FeedKind) -> Result<Vec<String>> {
        Ok(self.contents(kind)?.lines().map(str::to_owned).collect())
    }
}
