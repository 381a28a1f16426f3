use chrono::NaiveDate;

use fundwatch_feed_data::{FeedRow, NormalizedFeed};

use crate::ledger::{Holding, Ledger};
use crate::reconciliation::{reconcile, ReconciliationOutcome, ReconciliationReport};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn feed_of(rows: Vec<FeedRow>) -> NormalizedFeed {
    NormalizedFeed::from_rows(rows)
}

fn row(code: &str, name: &str, value: f64, pct: f64) -> FeedRow {
    FeedRow {
        code: code.to_string(),
        name: name.to_string(),
        estimated_value: value,
        estimated_change_pct: pct,
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn expect_report(outcome: ReconciliationOutcome) -> ReconciliationReport {
    match outcome {
        ReconciliationOutcome::Report(report) => report,
        other => panic!("expected a report, got {:?}", other),
    }
}

#[test]
fn single_matched_holding_metrics() {
    let mut ledger = Ledger::new();
    ledger.upsert(
        "005827",
        Holding {
            shares: 1000.0,
            cost_basis: 1.5,
            acquired_on: Some(date(2024, 1, 1)),
        },
    );
    let feed = feed_of(vec![row("005827", "X基金", 1.62, 0.8)]);

    let report = expect_report(reconcile(&ledger, Some(&feed), date(2024, 6, 1)));
    assert_eq!(report.rows.len(), 1);
    assert!(report.unmatched_codes.is_empty());

    let r = &report.rows[0];
    assert_eq!(r.name, "X基金");
    assert_close(r.market_value, 1620.0);
    assert_close(r.day_gain, 12.96);
    assert_close(r.total_gain, 120.0);
    assert_eq!(r.holding_days, Some(152));

    assert_close(report.summary.total_market_value, 1620.0);
    assert_close(report.summary.total_day_gain, 12.96);
    assert_close(report.summary.total_gain, 120.0);
}

#[test]
fn empty_ledger_yields_empty_portfolio() {
    let feed = feed_of(vec![row("005827", "X基金", 1.62, 0.8)]);
    assert_eq!(
        reconcile(&Ledger::new(), Some(&feed), date(2024, 6, 1)),
        ReconciliationOutcome::EmptyPortfolio
    );
    // Empty ledger wins even when the feed is also absent.
    assert_eq!(
        reconcile(&Ledger::new(), None, date(2024, 6, 1)),
        ReconciliationOutcome::EmptyPortfolio
    );
}

#[test]
fn absent_feed_yields_no_feed_data_not_zero_rows() {
    let mut ledger = Ledger::new();
    ledger.upsert(
        "005827",
        Holding {
            shares: 1000.0,
            cost_basis: 1.5,
            acquired_on: None,
        },
    );
    assert_eq!(
        reconcile(&ledger, None, date(2024, 6, 1)),
        ReconciliationOutcome::NoFeedData
    );
}

#[test]
fn zero_matches_is_a_zero_report_distinct_from_no_feed() {
    let mut ledger = Ledger::new();
    ledger.upsert(
        "999999",
        Holding {
            shares: 10.0,
            cost_basis: 1.0,
            acquired_on: None,
        },
    );
    let feed = feed_of(vec![row("005827", "X基金", 1.62, 0.8)]);

    let report = expect_report(reconcile(&ledger, Some(&feed), date(2024, 6, 1)));
    assert!(report.rows.is_empty());
    assert_eq!(report.unmatched_codes, vec!["999999"]);
    assert_eq!(report.summary.total_market_value, 0.0);
    assert_eq!(report.summary.total_day_gain, 0.0);
    assert_eq!(report.summary.total_gain, 0.0);
}

#[test]
fn unmatched_holdings_are_excluded_not_fatal() {
    let mut ledger = Ledger::new();
    for code in ["005827", "999999", "110011"] {
        ledger.upsert(
            code,
            Holding {
                shares: 100.0,
                cost_basis: 1.0,
                acquired_on: None,
            },
        );
    }
    let feed = feed_of(vec![
        row("005827", "甲", 1.1, 0.0),
        row("110011", "乙", 2.2, 0.0),
    ]);

    let report = expect_report(reconcile(&ledger, Some(&feed), date(2024, 6, 1)));
    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.unmatched_codes, vec!["999999"]);
}

#[test]
fn rows_follow_ledger_insertion_order() {
    let mut ledger = Ledger::new();
    for code in ["110011", "005827", "000001"] {
        ledger.upsert(
            code,
            Holding {
                shares: 1.0,
                cost_basis: 1.0,
                acquired_on: None,
            },
        );
    }
    // Feed order deliberately differs from ledger order.
    let feed = feed_of(vec![
        row("000001", "丙", 1.0, 0.0),
        row("005827", "乙", 1.0, 0.0),
        row("110011", "甲", 1.0, 0.0),
    ]);

    let report = expect_report(reconcile(&ledger, Some(&feed), date(2024, 6, 1)));
    let codes: Vec<&str> = report.rows.iter().map(|r| r.code.as_str()).collect();
    assert_eq!(codes, vec!["110011", "005827", "000001"]);
}

#[test]
fn zero_shares_holding_values_to_zero() {
    let mut ledger = Ledger::new();
    ledger.upsert(
        "005827",
        Holding {
            shares: 0.0,
            cost_basis: 0.0,
            acquired_on: None,
        },
    );
    let feed = feed_of(vec![row("005827", "X基金", 9.99, 5.0)]);

    let report = expect_report(reconcile(&ledger, Some(&feed), date(2024, 6, 1)));
    let r = &report.rows[0];
    assert_eq!(r.market_value, 0.0);
    assert_eq!(r.day_gain, 0.0);
    assert_eq!(r.total_gain, 0.0);
}

#[test]
fn missing_acquisition_date_leaves_duration_undefined() {
    let mut ledger = Ledger::new();
    ledger.upsert(
        "005827",
        Holding {
            shares: 1.0,
            cost_basis: 1.0,
            acquired_on: None,
        },
    );
    let feed = feed_of(vec![row("005827", "X基金", 1.0, 0.0)]);

    let report = expect_report(reconcile(&ledger, Some(&feed), date(2024, 6, 1)));
    assert_eq!(report.rows[0].holding_days, None);
}

#[test]
fn future_acquisition_date_clamps_duration_to_zero() {
    let mut ledger = Ledger::new();
    ledger.upsert(
        "005827",
        Holding {
            shares: 1.0,
            cost_basis: 1.0,
            acquired_on: Some(date(2024, 12, 31)),
        },
    );
    let feed = feed_of(vec![row("005827", "X基金", 1.0, 0.0)]);

    let report = expect_report(reconcile(&ledger, Some(&feed), date(2024, 6, 1)));
    assert_eq!(report.rows[0].holding_days, Some(0));
}

#[test]
fn negative_change_pct_gives_negative_day_gain() {
    let mut ledger = Ledger::new();
    ledger.upsert(
        "005827",
        Holding {
            shares: 100.0,
            cost_basis: 2.0,
            acquired_on: None,
        },
    );
    let feed = feed_of(vec![row("005827", "X基金", 1.8, -1.5)]);

    let report = expect_report(reconcile(&ledger, Some(&feed), date(2024, 6, 1)));
    let r = &report.rows[0];
    assert_close(r.market_value, 180.0);
    assert_close(r.day_gain, -2.7);
    assert_close(r.total_gain, -20.0);
}

#[test]
fn reconcile_is_pure() {
    let mut ledger = Ledger::new();
    ledger.upsert(
        "005827",
        Holding {
            shares: 1000.0,
            cost_basis: 1.5,
            acquired_on: Some(date(2024, 1, 1)),
        },
    );
    let feed = feed_of(vec![row("005827", "X基金", 1.62, 0.8)]);
    let as_of = date(2024, 6, 1);

    let first = reconcile(&ledger, Some(&feed), as_of);
    let second = reconcile(&ledger, Some(&feed), as_of);
    assert_eq!(first, second);
}

#[test]
fn summary_sums_across_rows() {
    let mut ledger = Ledger::new();
    ledger.upsert(
        "005827",
        Holding {
            shares: 1000.0,
            cost_basis: 1.5,
            acquired_on: None,
        },
    );
    ledger.upsert(
        "110011",
        Holding {
            shares: 100.0,
            cost_basis: 4.0,
            acquired_on: None,
        },
    );
    let feed = feed_of(vec![
        row("005827", "甲", 1.62, 0.8),
        row("110011", "乙", 3.5, -2.0),
    ]);

    let report = expect_report(reconcile(&ledger, Some(&feed), date(2024, 6, 1)));
    assert_close(report.summary.total_market_value, 1620.0 + 350.0);
    assert_close(report.summary.total_day_gain, 12.96 - 7.0);
    assert_close(report.summary.total_gain, 120.0 - 50.0);
}
