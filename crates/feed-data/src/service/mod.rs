//! Cache-fronted feed service.
//!
//! The entry point the rest of the system talks to: composes a
//! [`FeedProvider`], the normalizer, and the TTL cache into one pull-based
//! pipeline. Callers receive either a normalized snapshot or an explicit
//! "no data" value; they never see the provider's raw table.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::cache::TtlCache;
use crate::errors::FeedError;
use crate::models::{NavPoint, NormalizedFeed};
use crate::normalizer::normalize;
use crate::provider::FeedProvider;

/// Cache windows for the feed service.
///
/// Estimates move intraday, so their window is short; settled history only
/// changes once a day and can be held much longer. Observed deployments use
/// estimate TTLs between 60 and 600 seconds.
#[derive(Clone, Debug)]
pub struct FeedServiceConfig {
    /// Maximum staleness of a served estimate snapshot.
    pub estimates_ttl: Duration,
    /// Maximum staleness of a served nav history.
    pub history_ttl: Duration,
}

impl Default for FeedServiceConfig {
    fn default() -> Self {
        Self {
            estimates_ttl: Duration::from_secs(300),
            history_ttl: Duration::from_secs(3600),
        }
    }
}

/// Trait for the cache-fronted feed pipeline.
#[async_trait]
pub trait FeedServiceTrait: Send + Sync {
    /// Current normalized estimate snapshot, or `None` when the provider
    /// returned no usable data. Provider failures are surfaced as errors,
    /// never silently replaced with an empty snapshot.
    async fn estimates(&self) -> Result<Option<NormalizedFeed>, FeedError>;

    /// Settled unit-value history for one fund, ordered by date ascending.
    async fn nav_history(&self, code: &str) -> Result<Vec<NavPoint>, FeedError>;
}

/// Default implementation of [`FeedServiceTrait`].
pub struct FeedService {
    provider: Arc<dyn FeedProvider>,
    config: FeedServiceConfig,
    estimates_cache: TtlCache<Option<NormalizedFeed>>,
    history_cache: TtlCache<Vec<NavPoint>>,
}

impl FeedService {
    /// Create a service around the given provider.
    pub fn new(provider: Arc<dyn FeedProvider>, config: FeedServiceConfig) -> Self {
        Self {
            provider,
            config,
            estimates_cache: TtlCache::new(),
            history_cache: TtlCache::new(),
        }
    }
}

#[async_trait]
impl FeedServiceTrait for FeedService {
    async fn estimates(&self) -> Result<Option<NormalizedFeed>, FeedError> {
        let key = format!("{}:estimates", self.provider.id());
        let provider = Arc::clone(&self.provider);
        self.estimates_cache
            .get_or_produce(&key, self.config.estimates_ttl, || async move {
                let table = provider.fetch_estimates().await?;
                let feed = normalize(Some(&table));
                if feed.is_none() {
                    debug!(provider = provider.id(), "provider returned an empty table");
                }
                Ok(feed)
            })
            .await
    }

    async fn nav_history(&self, code: &str) -> Result<Vec<NavPoint>, FeedError> {
        let key = format!("{}:nav:{}", self.provider.id(), code);
        let provider = Arc::clone(&self.provider);
        let code = code.to_string();
        self.history_cache
            .get_or_produce(&key, self.config.history_ttl, || async move {
                provider.fetch_nav_history(&code).await
            })
            .await
    }
}
