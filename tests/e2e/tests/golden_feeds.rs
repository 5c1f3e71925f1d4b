//! Full generator runs checked the way a downstream reader sees them

use feed_config::OutputFormat;
use feed_e2e_tests::{check_market_data_order, FeedFileValidator, FeedRun, TestConfig};
use feed_generator::FeedKind;
use std::collections::HashSet;

#[test]
fn desk_defaults_golden_rows() {
    let run = FeedRun::execute(TestConfig::default()).unwrap();

    let prices = run.lines(FeedKind::Prices).unwrap();
    assert_eq!(prices.len(), 7 * 1_000);
    assert_eq!(prices[0], "2Y,99-00,0.0078125");
    assert_eq!(prices[1], "2Y,99-001,0.01171875");
    assert_eq!(prices[2], "2Y,99-002,0.015625");
    assert_eq!(prices[4], "2Y,99-00+,0.0078125");
    assert_eq!(prices[1_000], "3Y,99-00,0.0078125");

    let book = run.lines(FeedKind::MarketData).unwrap();
    assert_eq!(book.len(), 1_000 * 7 * 5);
    assert_eq!(
        &book[..6],
        &[
            "2Y,99-00,0.0078125,10000000,10000000",
            "2Y,99-00,0.015625,20000000,20000000",
            "2Y,99-00,0.0234375,30000000,30000000",
            "2Y,99-00,0.03125,40000000,40000000",
            "2Y,99-00,0.0390625,50000000,50000000",
            "3Y,99-00,0.0078125,10000000,10000000",
        ]
    );
    // second update: mid one tick up, top spread widened once
    assert_eq!(book[35], "2Y,99-001,0.015625,10000000,10000000");

    let trades = run.lines(FeedKind::Trades).unwrap();
    assert_eq!(trades.len(), 70);
    assert!(trades[0].starts_with("2Y,99-00,"));
    assert!(trades[0].ends_with(",1000000,BUY"));
    assert!(trades[1].starts_with("2Y,100-00,"));
    assert!(trades[1].ends_with(",2000000,SELL"));

    assert_eq!(run.lines(FeedKind::Inquiries).unwrap().len(), 70);
}

#[test]
fn every_feed_parses_back() {
    let run = FeedRun::execute(TestConfig::small()).unwrap();
    let validator = FeedFileValidator::new(b',');

    for kind in FeedKind::ALL {
        let rows = validator.validate(kind, &run.contents(kind).unwrap()).unwrap();
        assert!(!rows.is_empty(), "{} is empty", kind);
    }

    let book = validator
        .validate(FeedKind::MarketData, &run.contents(FeedKind::MarketData).unwrap())
        .unwrap();
    check_market_data_order(&book, 7, 5).unwrap();

    let trades = validator
        .validate(FeedKind::Trades, &run.contents(FeedKind::Trades).unwrap())
        .unwrap();
    let ids: HashSet<&str> = trades.iter().map(|r| r.rest[0].as_str()).collect();
    assert_eq!(ids.len(), trades.len());
}

#[test]
fn same_seed_is_byte_identical() {
    let first = FeedRun::execute(TestConfig::small().with_seed(11)).unwrap();
    let second = FeedRun::execute(TestConfig::small().with_seed(11)).unwrap();
    for kind in FeedKind::ALL {
        assert_eq!(
            first.contents(kind).unwrap(),
            second.contents(kind).unwrap(),
            "{} differs between runs",
            kind
        );
    }

    let reseeded = FeedRun::execute(TestConfig::small().with_seed(12)).unwrap();
    assert_eq!(
        first.contents(FeedKind::MarketData).unwrap(),
        reseeded.contents(FeedKind::MarketData).unwrap()
    );
    assert_ne!(
        first.contents(FeedKind::Inquiries).unwrap(),
        reseeded.contents(FeedKind::Inquiries).unwrap()
    );
}

#[test]
fn json_output_is_one_array_per_feed() {
    let run = FeedRun::execute(TestConfig::small().with_format(OutputFormat::Json)).unwrap();
    for summary in &run.summaries {
        assert_eq!(summary.path.extension().unwrap(), "json");
        let parsed: serde_json::Value =
            serde_json::from_str(&run.contents(summary.kind).unwrap()).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), summary.rows);
    }

    let prices: serde_json::Value =
        serde_json::from_str(&run.contents(FeedKind::Prices).unwrap()).unwrap();
    assert_eq!(prices[0]["instrument"], "2Y");
    assert_eq!(prices[0]["price"], "99-00");
    assert_eq!(prices[0]["spread"], 0.0078125);
}

#[test]
fn subset_run_writes_only_requested_feeds() {
    let config = TestConfig {
        kinds: vec![FeedKind::Trades],
        ..TestConfig::small()
    };
    let run = FeedRun::execute(config).unwrap();
    assert_eq!(run.summaries.len(), 1);
    assert!(run.dir().join("trades.txt").exists());
    assert!(!run.dir().join("prices.txt").exists());

    let full = FeedRun::execute(TestConfig::small()).unwrap();
    assert_eq!(
        run.contents(FeedKind::Trades).unwrap(),
        full.contents(FeedKind::Trades).unwrap()
    );
}
