//! Booked trades feed

use crate::error::{GeneratorError, GeneratorResult};
use crate::randomness::RandomSource;
use crate::records::TradeRecord;
use feed_config::TradeFeedConfig;
use std::collections::HashSet;
use tracing::{debug, warn};
use types::{Instrument, Side, TradeId};

/// Redraws allowed before an ID collision is treated as exhaustion
const MAX_ID_ATTEMPTS: usize = 64;

/// `per_instrument` trades per instrument, alternating BUY and SELL
///
/// Quantities cycle through the configured list in order and restart for
/// every instrument. Buys print at `buy_price`, sells at `sell_price`. The
/// trade ID and book are random draws, in that order, and IDs are unique
/// across the whole feed.
pub fn build_trades<R: RandomSource + ?Sized>(
    instruments: &[Instrument],
    config: &TradeFeedConfig,
    rng: &mut R,
) -> GeneratorResult<Vec<TradeRecord>> {
    if config.books.is_empty() || config.quantities.is_empty() {
        return Err(GeneratorError::precondition(
            "trade feed needs at least one book and one quantity",
        ));
    }
    if config.trade_id_length == 0 {
        return Err(GeneratorError::precondition("trade ID length must be positive"));
    }

    let buy_price = codec::encode(config.buy_price)?;
    let sell_price = codec::encode(config.sell_price)?;

    let mut issued = HashSet::with_capacity(instruments.len() * config.per_instrument);
    let mut rows = Vec::with_capacity(instruments.len() * config.per_instrument);
    for instrument in instruments {
        for i in 0..config.per_instrument {
            let side = Side::ALL[i % Side::ALL.len()];
            let price = match side {
                Side::Buy => buy_price,
                Side::Sell => sell_price,
            };
            let trade_id = unique_trade_id(rng, config.trade_id_length, &mut issued)?;
            let book = config.books[rng.pick_index(config.books.len())].clone();

            rows.push(TradeRecord {
                instrument: instrument.clone(),
                price,
                trade_id,
                book,
                quantity: config.quantities[i % config.quantities.len()],
                side,
            });
        }
        debug!(instrument = %instrument, trades = config.per_instrument, "Trades built");
    }
    Ok(rows)
}

fn unique_trade_id<R: RandomSource + ?Sized>(
    rng: &mut R,
    length: usize,
    issued: &mut HashSet<String>,
) -> GeneratorResult<TradeId> {
    for attempt in 0..MAX_ID_ATTEMPTS {
        let candidate = rng.alpha_string(length);
        if issued.insert(candidate.clone()) {
            return Ok(TradeId::new(candidate));
        }
        warn!(attempt, id = %candidate, "Trade ID collision, redrawing");
    }
    Err(GeneratorError::precondition(format!(
        "could not draw a unique {}-letter trade ID after {} attempts",
        length, MAX_ID_ATTEMPTS
    )))
}
