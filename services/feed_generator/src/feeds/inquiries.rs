//! Client inquiries feed

use crate::error::{GeneratorError, GeneratorResult};
use crate::randomness::RandomSource;
use crate::records::InquiryRecord;
use feed_config::InquiryFeedConfig;
use tracing::debug;
use types::precision::TICKS_PER_POINT;
use types::{InquiryId, Instrument, Side, TreasuryPrice};
use uuid::Builder;

/// `per_instrument` random inquiries per instrument
///
/// Each inquiry draws, in order: a v4 UUID, a side, a quantity on the
/// `quantity_step` grid within `[quantity_min, quantity_max]`, a handle in
/// `[handle_min, handle_max]` and a 1/256 fraction of a point.
pub fn build_inquiries<R: RandomSource + ?Sized>(
    instruments: &[Instrument],
    config: &InquiryFeedConfig,
    rng: &mut R,
) -> GeneratorResult<Vec<InquiryRecord>> {
    if config.quantity_step == 0 || config.quantity_min > config.quantity_max {
        return Err(GeneratorError::precondition(format!(
            "invalid inquiry quantity grid: {}..={} step {}",
            config.quantity_min, config.quantity_max, config.quantity_step
        )));
    }
    if config.handle_min > config.handle_max {
        return Err(GeneratorError::precondition(format!(
            "inquiry handle_min ({}) exceeds handle_max ({})",
            config.handle_min, config.handle_max
        )));
    }
    let quantity_steps = (config.quantity_max - config.quantity_min) / config.quantity_step;

    let mut rows = Vec::with_capacity(instruments.len() * config.per_instrument);
    for instrument in instruments {
        for _ in 0..config.per_instrument {
            let mut bytes = [0u8; 16];
            rng.fill_bytes(&mut bytes);
            let inquiry_id =
                InquiryId::new(Builder::from_random_bytes(bytes).into_uuid().to_string());

            let side = Side::ALL[rng.pick_index(Side::ALL.len())];
            let quantity =
                config.quantity_min + config.quantity_step * rng.range_inclusive(0, quantity_steps);

            let handle = rng.range_inclusive(config.handle_min, config.handle_max);
            let tick = rng.range_inclusive(0, TICKS_PER_POINT - 1);
            let price = handle
                .checked_mul(TICKS_PER_POINT)
                .and_then(|ticks| ticks.checked_add(tick))
                .map(TreasuryPrice::from_ticks)
                .ok_or_else(|| {
                    GeneratorError::precondition(format!("inquiry handle {} out of range", handle))
                })?;

            rows.push(InquiryRecord {
                instrument: instrument.clone(),
                price: codec::encode_price(price),
                inquiry_id,
                side,
                quantity,
            });
        }
        debug!(instrument = %instrument, inquiries = config.per_instrument, "Inquiries built");
    }
    Ok(rows)
}
