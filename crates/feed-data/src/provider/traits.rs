use async_trait::async_trait;

use crate::errors::FeedError;
use crate::models::{NavPoint, RawTable};

/// Trait for estimate feed providers.
///
/// Implement this trait to add support for a new feed source. The provider
/// is a thin I/O wrapper: it returns the table as received, without
/// interpreting it. The normalizer owns schema tolerance; the cache layer
/// owns staleness. A hung provider should fail via its own timeout rather
/// than block callers indefinitely.
#[async_trait]
pub trait FeedProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// A constant string like "EASTMONEY". Used for logging and as part of
    /// cache keys.
    fn id(&self) -> &'static str;

    /// Fetch the current valuation-estimate table for all funds the
    /// provider knows about.
    ///
    /// The table's column names, order, and count are not guaranteed stable
    /// across calls.
    async fn fetch_estimates(&self) -> Result<RawTable, FeedError>;

    /// Fetch the settled unit-value history for one fund.
    ///
    /// Points are returned ordered by date ascending.
    async fn fetch_nav_history(&self, code: &str) -> Result<Vec<NavPoint>, FeedError>;
}
