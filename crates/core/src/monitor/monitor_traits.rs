use async_trait::async_trait;

use fundwatch_feed_data::NavPoint;

use crate::errors::Result;
use crate::ledger::{Holding, Ledger};
use crate::reconciliation::ReconciliationOutcome;

/// Trait for the monitor session: ledger mutations plus the pull-based
/// refresh that values the current holdings against the estimate feed.
#[async_trait]
pub trait MonitorServiceTrait: Send + Sync {
    /// Value the current holdings against the (possibly cached) feed.
    ///
    /// A failed or timed-out feed fetch yields
    /// [`ReconciliationOutcome::NoFeedData`], never an error and never a
    /// zero-filled table.
    async fn refresh(&self) -> Result<ReconciliationOutcome>;

    /// Add or replace one holding and persist the ledger immediately.
    async fn add_holding(&self, code: &str, holding: Holding) -> Result<()>;

    /// Drop all holdings and persist the empty ledger immediately.
    async fn clear_holdings(&self) -> Result<()>;

    /// Read-only snapshot of the in-memory ledger.
    async fn holdings(&self) -> Ledger;

    /// Settled unit-value history for one fund, for the history chart.
    async fn nav_history(&self, code: &str) -> Result<Vec<NavPoint>>;
}
