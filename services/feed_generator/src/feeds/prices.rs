//! Flat reference-price feed

use crate::error::GeneratorResult;
use crate::oscillator::{OscillatorConfig, PriceOscillator};
use crate::records::PriceRecord;
use codec::FractionalNotation;
use feed_config::PriceFeedConfig;
use tracing::debug;
use types::Instrument;

/// Tiled price and spread waves, the same series for every instrument
///
/// Rows are grouped by instrument in universe order, `samples` rows each.
pub fn build_prices(
    instruments: &[Instrument],
    config: &PriceFeedConfig,
) -> GeneratorResult<Vec<PriceRecord>> {
    let prices = PriceOscillator::tiled(OscillatorConfig::new(
        config.price_start,
        config.price_end,
        config.price_step,
        config.samples,
    ))?;
    let spreads = PriceOscillator::tiled(OscillatorConfig::new(
        config.spread_min,
        config.spread_max,
        config.spread_step,
        config.samples,
    ))?;

    let quotes: Vec<FractionalNotation> = prices
        .samples()
        .map(codec::encode)
        .collect::<Result<_, _>>()?;
    let spreads: Vec<f64> = spreads.samples().collect();

    let mut rows = Vec::with_capacity(instruments.len() * quotes.len());
    for instrument in instruments {
        rows.extend(
            quotes
                .iter()
                .zip(&spreads)
                .map(|(price, spread)| PriceRecord {
                    instrument: instrument.clone(),
                    price: *price,
                    spread: *spread,
                }),
        );
        debug!(instrument = %instrument, samples = quotes.len(), "Price series built");
    }
    Ok(rows)
}
