use serde::{Deserialize, Serialize};

/// One matched holding x feed-row pair with its derived metrics.
///
/// Recomputed on every request, never persisted. All numeric fields are
/// plain doubles; formatting (currency symbol, percent sign, decimal
/// places) belongs to the presentation adapter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciledRow {
    /// Fund code, as recorded in the ledger.
    pub code: String,
    /// Fund display name, taken from the feed snapshot.
    pub name: String,
    /// Units held.
    pub shares: f64,
    /// Average net-value-per-share paid.
    pub cost_basis: f64,
    /// Current estimated unit value from the feed.
    pub estimated_value: f64,
    /// Signed percentage points vs. the previous settled unit value.
    pub estimated_change_pct: f64,
    /// `estimated_value * shares`.
    pub market_value: f64,
    /// `market_value * estimated_change_pct / 100`.
    ///
    /// This uses today's estimate as the base even though the percentage is
    /// quoted against the previous settled value, which slightly overstates
    /// the day's move. Deliberately kept that way for parity with the
    /// published dashboards; `total_gain` is the independent exact figure.
    pub day_gain: f64,
    /// `(estimated_value - cost_basis) * shares`.
    pub total_gain: f64,
    /// Calendar days held as of the request date, `None` when the holding
    /// has no recorded acquisition date. Never negative.
    pub holding_days: Option<i64>,
}

/// Aggregates over one reconciliation request's rows.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateSummary {
    pub total_market_value: f64,
    pub total_day_gain: f64,
    pub total_gain: f64,
}

/// Rows plus summary for one reconciliation request.
///
/// `unmatched_codes` lists ledger entries the feed snapshot did not cover
/// (closed funds, feed gaps). That is a warning-worthy but non-fatal
/// condition callers may surface as "N of M holdings unmatched"; a report
/// with zero rows and all-zero aggregates is still a valid answer, distinct
/// from "no feed data at all".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationReport {
    /// Matched rows, in ledger insertion order.
    pub rows: Vec<ReconciledRow>,
    pub summary: AggregateSummary,
    /// Ledger codes absent from the feed snapshot, in ledger order.
    pub unmatched_codes: Vec<String>,
}

/// Outcome of one reconciliation request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status", content = "report")]
pub enum ReconciliationOutcome {
    /// The ledger holds no entries; nothing to value.
    EmptyPortfolio,
    /// The feed could not be obtained; the request was not satisfied.
    /// Explicitly distinct from a report with zero matches.
    NoFeedData,
    /// The join ran; the report may still contain zero rows.
    Report(ReconciliationReport),
}
