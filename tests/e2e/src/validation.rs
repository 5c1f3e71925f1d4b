//! Consumer-side validation of written feed files

use anyhow::{anyhow, bail, Context, Result};
use feed_generator::FeedKind;
use std::collections::HashMap;
use types::{Instrument, Side, TreasuryPrice};

/// One delimited row, with the leading instrument and price parsed
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    pub instrument: Instrument,
    pub price: TreasuryPrice,
    /// Columns after the price, as written
    pub rest: Vec<String>,
}

pub struct FeedFileValidator {
    expected_columns: HashMap<FeedKind, usize>,
    delimiter: u8,
}

impl FeedFileValidator {
    pub fn new(delimiter: u8) -> Self {
        let mut expected_columns = HashMap::new();

        // instrument, price, spread
        expected_columns.insert(FeedKind::Prices, 3);
        // instrument, price, trade_id, book, quantity, side
        expected_columns.insert(FeedKind::Trades, 6);
        // instrument, price, spread, bid_size, offer_size
        expected_columns.insert(FeedKind::MarketData, 5);
        // instrument, price, inquiry_id, side, quantity
        expected_columns.insert(FeedKind::Inquiries, 5);

        Self {
            expected_columns,
            delimiter,
        }
    }

    /// Parse every row, failing on the first malformed one
    pub fn validate(&self, kind: FeedKind, contents: &str) -> Result<Vec<ParsedRow>> {
        let expected = self
            .expected_columns
            .get(&kind)
            .copied()
            .ok_or_else(|| anyhow!("No column layout for {}", kind))?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(self.delimiter)
            .from_reader(contents.as_bytes());

        let mut rows = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = record.with_context(|| format!("{} line {}", kind, line + 1))?;
            if record.len() != expected {
                bail!(
                    "{} line {}: expected {} columns, got {}",
                    kind,
                    line + 1,
                    expected,
                    record.len()
                );
            }
            let row = self
                .parse_row(kind, &record)
                .with_context(|| format!("{} line {}", kind, line + 1))?;
            rows.push(row);
        }
        Ok(rows)
    }

    fn parse_row(&self, kind: FeedKind, record: &csv::StringRecord) -> Result<ParsedRow> {
        let instrument = Instrument::new(&record[0])?;
        let price = codec::decode_price(&record[1])?;
        let rest: Vec<String> = record.iter().skip(2).map(str::to_owned).collect();

        match kind {
            FeedKind::Prices => {
                non_negative_decimal(&rest[0])?;
            }
            FeedKind::Trades => {
                positive_integer(&rest[2])?;
                rest[3].parse::<Side>()?;
            }
            FeedKind::MarketData => {
                non_negative_decimal(&rest[0])?;
                let bid = positive_integer(&rest[1])?;
                let offer = positive_integer(&rest[2])?;
                if bid != offer {
                    bail!("bid size {} != offer size {}", bid, offer);
                }
            }
            FeedKind::Inquiries => {
                rest[1].parse::<Side>()?;
                positive_integer(&rest[2])?;
            }
        }

        Ok(ParsedRow {
            instrument,
            price,
            rest,
        })
    }
}

fn non_negative_decimal(field: &str) -> Result<f64> {
    let value: f64 = field
        .parse()
        .with_context(|| format!("not a decimal: {:?}", field))?;
    if !(value.is_finite() && value >= 0.0) {
        bail!("expected a non-negative decimal, got {}", value);
    }
    Ok(value)
}

fn positive_integer(field: &str) -> Result<u64> {
    let value: u64 = field
        .parse()
        .with_context(|| format!("not an integer: {:?}", field))?;
    if value == 0 {
        bail!("expected a positive integer");
    }
    Ok(value)
}

/// Market data rows must run update by update, curve order within an
/// update and top of book first within an instrument
pub fn check_market_data_order(
    rows: &[ParsedRow],
    instruments: usize,
    levels: usize,
) -> Result<()> {
    let block = instruments * levels;
    if block == 0 || rows.len() % block != 0 {
        bail!("{} rows do not divide into updates of {}", rows.len(), block);
    }

    for (u, update) in rows.chunks(block).enumerate() {
        let mid = update[0].price;
        let mut last_tenor = None;
        for book in update.chunks(levels) {
            let tenor = book[0].instrument.tenor()?;
            if last_tenor.map_or(false, |last| tenor <= last) {
                bail!("update {}: {} out of curve order", u, book[0].instrument);
            }
            last_tenor = Some(tenor);

            for (depth, row) in book.iter().enumerate() {
                if row.instrument != book[0].instrument || row.price != mid {
                    bail!("update {} level {}: mixed instrument or mid", u, depth + 1);
                }
            }
            let spreads = book
                .iter()
                .map(|r| non_negative_decimal(&r.rest[0]))
                .collect::<Result<Vec<_>>>()?;
            if spreads.windows(2).any(|w| w[1] <= w[0]) {
                bail!("update {} {}: spreads not widening with depth", u, book[0].instrument);
            }
        }
    }
    Ok(())
}
