//! Static data for the seven on-the-run US Treasuries
//!
//! The fixture universe defaults to these tenors. CUSIPs, coupons and
//! maturities are the issues on the run in December 2023; PV01 values are
//! per 100 face as of 2023-12-22.

use crate::common::identifiers::{Instrument, Tenor};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::Serialize;

/// Reference record for one on-the-run Treasury
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OnTheRunTreasury {
    pub label: &'static str,
    pub tenor: Tenor,
    pub cusip: &'static str,
    /// Annual coupon in percent
    pub coupon: f64,
    pub maturity: NaiveDate,
    pub pv01: f64,
}

fn issue(
    label: &'static str,
    years: u32,
    cusip: &'static str,
    coupon: f64,
    (y, m, d): (i32, u32, u32),
    pv01: f64,
) -> OnTheRunTreasury {
    OnTheRunTreasury {
        label,
        tenor: Tenor::years(years),
        cusip,
        coupon,
        // Literal calendar dates below are all valid
        maturity: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        pv01,
    }
}

static ON_THE_RUN: Lazy<Vec<OnTheRunTreasury>> = Lazy::new(|| {
    vec![
        issue("2Y", 2, "91282CJL6", 4.875, (2025, 11, 30), 0.0184433),
        issue("3Y", 3, "91282CJP7", 4.375, (2026, 12, 15), 0.027892),
        issue("5Y", 5, "91282CJN2", 4.375, (2028, 11, 30), 0.0451297),
        issue("7Y", 7, "91282CJM4", 4.375, (2030, 11, 30), 0.0613336),
        issue("10Y", 10, "91282CJJ1", 4.5, (2033, 11, 15), 0.0840999),
        issue("20Y", 20, "912810TW8", 4.75, (2043, 11, 15), 0.1410550),
        issue("30Y", 30, "912810TV0", 4.75, (2053, 11, 15), 0.1890362),
    ]
});

/// All on-the-run issues, shortest tenor first
pub fn on_the_run() -> &'static [OnTheRunTreasury] {
    &ON_THE_RUN
}

/// Look up an issue by tenor label (`"10Y"`) or CUSIP
pub fn lookup(key: &str) -> Option<&'static OnTheRunTreasury> {
    ON_THE_RUN
        .iter()
        .find(|issue| issue.label == key || issue.cusip == key)
}

/// Default fixture universe: the on-the-run tenor labels in curve order
pub fn default_universe() -> Vec<Instrument> {
    ON_THE_RUN
        .iter()
        .filter_map(|issue| Instrument::new(issue.label).ok())
        .collect()
}
