//! Output row shapes, one per feed
//!
//! Field order is the column order of the delimited output: instrument first,
//! then the quoted price in handle-and-fraction notation, then feed-specific
//! columns. Spreads stay plain decimals.

use codec::FractionalNotation;
use serde::Serialize;
use std::fmt;
use types::{InquiryId, Instrument, Side, TradeId};

/// The four fixture feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum)]
pub enum FeedKind {
    Prices,
    Trades,
    MarketData,
    Inquiries,
}

impl FeedKind {
    pub const ALL: [FeedKind; 4] = [
        FeedKind::Prices,
        FeedKind::Trades,
        FeedKind::MarketData,
        FeedKind::Inquiries,
    ];

    /// Output file name without extension
    pub fn file_stem(self) -> &'static str {
        match self {
            FeedKind::Prices => "prices",
            FeedKind::Trades => "trades",
            FeedKind::MarketData => "marketdata",
            FeedKind::Inquiries => "inquiries",
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

/// Reference price with a bid/offer spread
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRecord {
    pub instrument: Instrument,
    pub price: FractionalNotation,
    pub spread: f64,
}

/// Booked trade
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRecord {
    pub instrument: Instrument,
    pub price: FractionalNotation,
    pub trade_id: TradeId,
    pub book: String,
    pub quantity: u64,
    pub side: Side,
}

/// One depth level of a book update
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketDataRecord {
    pub instrument: Instrument,
    pub price: FractionalNotation,
    pub spread: f64,
    pub bid_size: u64,
    pub offer_size: u64,
}

/// Client request for quote
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InquiryRecord {
    pub instrument: Instrument,
    pub price: FractionalNotation,
    pub inquiry_id: InquiryId,
    pub side: Side,
    pub quantity: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stems() {
        let stems: Vec<&str> = FeedKind::ALL.iter().map(|k| k.file_stem()).collect();
        assert_eq!(stems, vec!["prices", "trades", "marketdata", "inquiries"]);
        assert_eq!(FeedKind::MarketData.to_string(), "marketdata");
    }

    #[test]
    fn test_records_serialize_flat() {
        let record = TradeRecord {
            instrument: Instrument::new("10Y").unwrap(),
            price: codec::encode(99.0).unwrap(),
            trade_id: TradeId::new("abcdefghij"),
            book: "TRSY1".to_string(),
            quantity: 1_000_000,
            side: Side::Buy,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["instrument"], "10Y");
        assert_eq!(json["price"], "99-00");
        assert_eq!(json["trade_id"], "abcdefghij");
        assert_eq!(json["side"], "BUY");
    }
}
