//! Fixture feed generator entry point

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use feed_config::{FeedConfig, OutputFormat};
use feed_generator::{FeedGenerator, FeedKind, FeedSink};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "feedgen", author, version, about, long_about = None)]
struct Args {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write fixture feeds to disk
    Generate {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory (overrides output.dir)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Seed for random fields (overrides seed)
        #[arg(long)]
        seed: Option<u64>,

        /// Feeds to write; all of them when omitted
        #[arg(long = "feed", value_enum)]
        feeds: Vec<FeedKind>,

        /// Output format (overrides output.format)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
    },

    /// Convert between decimal prices and handle-and-fraction notation
    Convert {
        /// `100.796875` or `100-25+`
        value: String,
    },

    /// List the on-the-run reference issues behind the default universe
    Instruments,

    /// Print the resolved configuration as TOML
    ShowConfig {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "feed_generator=info,feedgen=info,warn".into());
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.json_logs);

    match args.command {
        Command::Generate {
            config,
            out,
            seed,
            feeds,
            format,
        } => {
            let mut feed_config = FeedConfig::load(config.as_deref())?;
            if let Some(out) = out {
                feed_config.output.dir = out;
            }
            if let Some(seed) = seed {
                feed_config.seed = seed;
            }
            if let Some(format) = format {
                feed_config.output.format = format.into();
            }
            generate(feed_config, &feeds)
        }
        Command::Convert { value } => {
            println!("{}", convert(&value)?);
            Ok(())
        }
        Command::Instruments => {
            for line in instrument_table() {
                println!("{}", line);
            }
            Ok(())
        }
        Command::ShowConfig { config } => {
            let feed_config = FeedConfig::load(config.as_deref())?;
            print!("{}", feed_config.to_toml()?);
            Ok(())
        }
    }
}

/// Requested feeds once each in feed order; every feed when none given
fn requested_kinds(requested: &[FeedKind]) -> Vec<FeedKind> {
    if requested.is_empty() {
        return FeedKind::ALL.to_vec();
    }
    requested
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn generate(config: FeedConfig, requested: &[FeedKind]) -> Result<()> {
    let kinds = requested_kinds(requested);

    info!("Starting feed generator");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let sink = FeedSink::from_config(&config.output, config.delimiter_byte()?);
    let generator = FeedGenerator::new(config)?;
    info!(
        instruments = generator.instruments().len(),
        seed = generator.config().seed,
        dir = ?sink.dir(),
        "Generating {} feed(s)",
        kinds.len()
    );

    for summary in generator
        .write_all(&kinds, &sink)
        .context("Feed generation failed")?
    {
        println!("{}\t{}\t{}", summary.kind, summary.rows, summary.path.display());
    }
    Ok(())
}

/// TAB-separated rows: label, CUSIP, coupon, maturity, PV01
fn instrument_table() -> Vec<String> {
    types::reference::on_the_run()
        .iter()
        .map(|issue| {
            format!(
                "{}\t{}\t{:.3}\t{}\t{:.7}",
                issue.label, issue.cusip, issue.coupon, issue.maturity, issue.pv01
            )
        })
        .collect()
}

/// Notation in, decimal out; decimal in, notation out
fn convert(value: &str) -> Result<String> {
    let value = value.trim();
    if value.contains(codec::HANDLE_SEPARATOR) {
        let price = codec::decode_price(value)?;
        Ok(price.to_string())
    } else {
        let price = types::TreasuryPrice::from_decimal_str(value)
            .with_context(|| format!("Not a decimal price: {:?}", value))?;
        Ok(codec::encode_price(price).to_string())
    }
}
