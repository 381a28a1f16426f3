use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use tokio::sync::RwLock;

use fundwatch_feed_data::{FeedServiceTrait, NavPoint};

use crate::errors::Result;
use crate::ledger::{Holding, Ledger, LedgerStoreTrait};
use crate::monitor::MonitorServiceTrait;
use crate::reconciliation::{reconcile, ReconciliationOutcome};
use crate::utils::time_utils::valuation_date_today;

/// Monitor session over one user's ledger.
///
/// Holds the ledger in memory across repeated requests: loaded once at
/// construction, persisted through the store on every mutation. The engine
/// itself stays a pure function; this service owns the lifecycle around it.
pub struct MonitorService {
    store: Arc<dyn LedgerStoreTrait>,
    feed: Arc<dyn FeedServiceTrait>,
    ledger: RwLock<Ledger>,
}

impl MonitorService {
    /// Create a session, loading the persisted ledger as its starting state.
    pub fn new(store: Arc<dyn LedgerStoreTrait>, feed: Arc<dyn FeedServiceTrait>) -> Self {
        let ledger = store.load();
        debug!("Monitor session started with {} holdings", ledger.len());
        Self {
            store,
            feed,
            ledger: RwLock::new(ledger),
        }
    }
}

#[async_trait]
impl MonitorServiceTrait for MonitorService {
    async fn refresh(&self) -> Result<ReconciliationOutcome> {
        let feed = match self.feed.estimates().await {
            Ok(feed) => feed,
            Err(e) => {
                // One bad fetch must not take down the view; the caller is
                // told the request could not be satisfied.
                warn!("Estimate fetch failed, reporting no feed data: {}", e);
                None
            }
        };

        let ledger = self.ledger.read().await;
        Ok(reconcile(&ledger, feed.as_ref(), valuation_date_today()))
    }

    async fn add_holding(&self, code: &str, holding: Holding) -> Result<()> {
        let updated = self.store.upsert(code, holding)?;
        *self.ledger.write().await = updated;
        Ok(())
    }

    async fn clear_holdings(&self) -> Result<()> {
        self.store.clear()?;
        self.ledger.write().await.clear();
        Ok(())
    }

    async fn holdings(&self) -> Ledger {
        self.ledger.read().await.clone()
    }

    async fn nav_history(&self, code: &str) -> Result<Vec<NavPoint>> {
        Ok(self.feed.nav_history(code).await?)
    }
}
