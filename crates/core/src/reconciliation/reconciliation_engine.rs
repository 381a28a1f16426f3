use chrono::NaiveDate;
use log::debug;

use fundwatch_feed_data::NormalizedFeed;

use crate::ledger::Ledger;
use crate::reconciliation::{
    AggregateSummary, ReconciledRow, ReconciliationOutcome, ReconciliationReport,
};

/// Join the ledger against a normalized feed snapshot and compute the
/// per-holding and aggregate metrics.
///
/// Pure function of its three inputs: no I/O, no clock reads, identical
/// inputs give identical output. Holdings are visited in ledger insertion
/// order; codes are matched by exact string equality. A holding with no
/// feed row is excluded from the rows and reported in `unmatched_codes`.
pub fn reconcile(
    ledger: &Ledger,
    feed: Option<&NormalizedFeed>,
    as_of: NaiveDate,
) -> ReconciliationOutcome {
    if ledger.is_empty() {
        return ReconciliationOutcome::EmptyPortfolio;
    }
    let Some(feed) = feed else {
        return ReconciliationOutcome::NoFeedData;
    };

    let mut rows = Vec::with_capacity(ledger.len());
    let mut unmatched_codes = Vec::new();

    for (code, holding) in ledger.iter() {
        let Some(feed_row) = feed.get(code) else {
            unmatched_codes.push(code.to_string());
            continue;
        };

        let market_value = feed_row.estimated_value * holding.shares;
        let day_gain = market_value * feed_row.estimated_change_pct / 100.0;
        let total_gain = (feed_row.estimated_value - holding.cost_basis) * holding.shares;
        let holding_days = holding
            .acquired_on
            .map(|acquired| (as_of - acquired).num_days().max(0));

        rows.push(ReconciledRow {
            code: code.to_string(),
            name: feed_row.name.clone(),
            shares: holding.shares,
            cost_basis: holding.cost_basis,
            estimated_value: feed_row.estimated_value,
            estimated_change_pct: feed_row.estimated_change_pct,
            market_value,
            day_gain,
            total_gain,
            holding_days,
        });
    }

    if !unmatched_codes.is_empty() {
        debug!(
            "{} of {} holdings had no feed row: {:?}",
            unmatched_codes.len(),
            ledger.len(),
            unmatched_codes
        );
    }

    let summary = summarize(&rows);
    ReconciliationOutcome::Report(ReconciliationReport {
        rows,
        summary,
        unmatched_codes,
    })
}

fn summarize(rows: &[ReconciledRow]) -> AggregateSummary {
    let mut summary = AggregateSummary::default();
    for row in rows {
        summary.total_market_value += row.market_value;
        summary.total_day_gain += row.day_gain;
        summary.total_gain += row.total_gain;
    }
    summary
}
