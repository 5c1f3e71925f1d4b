//! # Treasury Price Codec
//!
//! ## Purpose
//!
//! This crate contains the "Rules" layer for price text in the fixture feeds:
//! - Decimal → handle-and-fraction encoding (`100.796875` → `100-25+`)
//! - Handle-and-fraction → decimal decoding with strict grammar validation
//! - Serde support so feed rows serialize quotes as text
//!
//! ## Architecture Role
//!
//! ```text
//! libs/types  →  [codec]  →  services/feed_generator
//!     ↑            ↓                 ↓
//! Pure Data    Price Text        Feed Rows
//! TreasuryPrice  encode/decode   CSV / JSON sinks
//! ```
//!
//! ## What This Crate Does NOT Contain
//! - Oscillators or feed construction (belongs in services/feed_generator)
//! - File or socket I/O of any kind
//!
//! ## Round-Trip Law
//!
//! For every price on the 1/256 grid, `decode(encode(x)) == x` exactly. The
//! codec is pure and stateless; it is safe to call from any thread.

pub mod error;
pub mod fractional;

pub use error::{CodecError, CodecResult};
pub use fractional::{
    decode, decode_price, encode, encode_price, EighthsTag, FractionalNotation,
    HALF_TICK_SIGIL, HANDLE_SEPARATOR,
};
