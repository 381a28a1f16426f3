//! Time-to-live cache for feed fetches.
//!
//! Wraps the fetch + normalize pipeline so repeated refresh requests within
//! the TTL window reuse the last successful result instead of re-hitting the
//! provider. Keys identify the call (provider + operation + parameters);
//! each key gets its own async mutex so concurrent callers that miss the
//! cache serialize on a single producer invocation rather than stampeding
//! the provider.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::debug;

/// A cached value together with the instant it was produced.
struct Slot<T> {
    value: Option<(T, Instant)>,
}

/// Keyed TTL cache with per-key single-flight production.
///
/// Failure semantics: a failed producer leaves the entry absent, so the next
/// call retries naturally and no error is ever served from cache. A stale
/// entry is dropped before the producer runs; the previous value is never
/// served past its TTL as a fallback. A successful "no data" result is a
/// value like any other and is cached for the full TTL.
pub struct TtlCache<T> {
    slots: DashMap<String, Arc<Mutex<Slot<T>>>>,
}

impl<T: Clone> TtlCache<T> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
        }
    }

    /// Return the value produced for `key` within the last `ttl`, or invoke
    /// `producer` once, store its result, and return it.
    pub async fn get_or_produce<F, Fut, E>(
        &self,
        key: &str,
        ttl: Duration,
        producer: F,
    ) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let slot = self.slot(key);
        // The per-key lock is held across the producer await: callers queued
        // behind an in-flight fill observe its freshly stored value instead
        // of fetching again.
        let mut guard = slot.lock().await;

        if let Some((value, produced_at)) = &guard.value {
            if produced_at.elapsed() <= ttl {
                debug!(key, "feed cache hit");
                return Ok(value.clone());
            }
            debug!(key, "feed cache entry expired");
            guard.value = None;
        }

        let value = producer().await?;
        guard.value = Some((value.clone(), Instant::now()));
        debug!(key, "feed cache filled");
        Ok(value)
    }

    /// Drop the entry for `key`, forcing the next call to produce.
    pub fn invalidate(&self, key: &str) {
        self.slots.remove(key);
    }

    fn slot(&self, key: &str) -> Arc<Mutex<Slot<T>>> {
        // Clone the Arc out so the map shard lock is not held across awaits.
        self.slots
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(Slot { value: None })))
            .clone()
    }
}

impl<T: Clone> Default for TtlCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn second_call_within_ttl_skips_producer() {
        let cache: TtlCache<u32> = TtlCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            let got: Result<u32, ()> = cache
                .get_or_produce("k", Duration::from_secs(60), || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(7)
                })
                .await;
            assert_eq!(got, Ok(7));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expired_entry_is_reproduced() {
        let cache: TtlCache<u32> = TtlCache::new();
        let calls = AtomicUsize::new(0);

        for expected in [1, 2] {
            let got: Result<u32, ()> = cache
                .get_or_produce("k", Duration::ZERO, || async {
                    Ok(calls.fetch_add(1, Ordering::SeqCst) as u32 + 1)
                })
                .await;
            assert_eq!(got, Ok(expected));
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn producer_failure_is_not_cached() {
        let cache: TtlCache<u32> = TtlCache::new();
        let calls = AtomicUsize::new(0);

        let first: Result<u32, &str> = cache
            .get_or_produce("k", Duration::from_secs(60), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("boom")
            })
            .await;
        assert_eq!(first, Err("boom"));

        let second: Result<u32, &str> = cache
            .get_or_produce("k", Duration::from_secs(60), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(9)
            })
            .await;
        assert_eq!(second, Ok(9));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn no_data_result_is_a_cacheable_value() {
        let cache: TtlCache<Option<u32>> = TtlCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            let got: Result<Option<u32>, ()> = cache
                .get_or_produce("k", Duration::from_secs(60), || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(None)
                })
                .await;
            assert_eq!(got, Ok(None));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_misses_produce_once() {
        let cache = Arc::new(TtlCache::<u32>::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let cache = Arc::clone(&cache);
            let calls = Arc::clone(&calls);
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_produce("k", Duration::from_secs(60), || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(20)).await;
                        Ok::<u32, ()>(42)
                    })
                    .await
            }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap(), Ok(42));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn keys_are_independent() {
        let cache: TtlCache<u32> = TtlCache::new();
        let a: Result<u32, ()> = cache
            .get_or_produce("a", Duration::from_secs(60), || async { Ok(1) })
            .await;
        let b: Result<u32, ()> = cache
            .get_or_produce("b", Duration::from_secs(60), || async { Ok(2) })
            .await;
        assert_eq!((a, b), (Ok(1), Ok(2)));

        cache.invalidate("a");
        let a2: Result<u32, ()> = cache
            .get_or_produce("a", Duration::from_secs(60), || async { Ok(3) })
            .await;
        assert_eq!(a2, Ok(3));
    }
}
