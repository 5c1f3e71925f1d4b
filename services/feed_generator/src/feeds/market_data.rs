//! Leveled order-book feed

use crate::book::OrderBookLevelExpander;
use crate::error::GeneratorResult;
use crate::oscillator::{OscillatorConfig, PriceOscillator, SpreadConfig, SpreadOscillator};
use crate::records::MarketDataRecord;
use codec::FractionalNotation;
use feed_config::MarketDataConfig;
use tracing::debug;
use types::{BookLevel, Instrument, Tenor};

/// Book level tagged with the keys it is ordered by
#[derive(Debug)]
struct StagedLevel<'a> {
    update: usize,
    tenor: Tenor,
    instrument: &'a Instrument,
    price: FractionalNotation,
    level: BookLevel,
}

/// Reflecting mids and sawtooth spreads expanded to full depth
///
/// Every instrument sees the same mid and spread series. Rows are ordered by
/// update index, then tenor (shortest first), then depth level, so a reader
/// replays the whole curve one tick at a time. Instrument labels must parse
/// as tenors.
pub fn build_market_data(
    instruments: &[Instrument],
    config: &MarketDataConfig,
) -> GeneratorResult<Vec<MarketDataRecord>> {
    let mids = PriceOscillator::reflecting(OscillatorConfig::new(
        config.mid_start,
        config.mid_end,
        config.mid_step,
        config.updates,
    ))?;
    let spreads = SpreadOscillator::new(
        SpreadConfig {
            start: config.spread_start,
            increment: config.spread_increment,
            max: config.spread_max,
            reset: config.spread_reset,
            length: config.updates,
        },
        config.reset_rule,
    )?;
    let expander = OrderBookLevelExpander::new(
        config.levels,
        config.spread_increment,
        config.size_multiplier,
    )?;

    let ticks: Vec<(f64, FractionalNotation, f64)> = mids
        .samples()
        .zip(spreads.samples())
        .map(|(mid, spread)| -> GeneratorResult<_> {
            Ok((mid, codec::encode(mid)?, spread))
        })
        .collect::<GeneratorResult<_>>()?;

    let depth = expander.levels() as usize;
    let mut staged = Vec::with_capacity(instruments.len() * ticks.len() * depth);
    for instrument in instruments {
        let tenor = instrument.tenor()?;
        for (update, (mid, price, spread)) in ticks.iter().enumerate() {
            staged.extend(
                expander
                    .expand(*mid, *spread)
                    .into_iter()
                    .map(|level| StagedLevel {
                        update,
                        tenor,
                        instrument,
                        price: *price,
                        level,
                    }),
            );
        }
        debug!(instrument = %instrument, %tenor, updates = ticks.len(), depth, "Book series built");
    }

    staged.sort_by_key(|row| (row.update, row.tenor, row.level.level));

    Ok(staged
        .into_iter()
        .map(|row| MarketDataRecord {
            instrument: row.instrument.clone(),
            price: row.price,
            spread: row.level.spread,
            bid_size: row.level.bid_size,
            offer_size: row.level.offer_size,
        })
        .collect())
}
