//! Metered Cache
//!
//! A [`TtlCache`] in front of a [`Throttle`]: hits are served without
//! touching the gate, misses go through the throttle and successful results
//! are stored. Several caches may share one throttle so that every call a
//! client makes counts against the same budget.

use std::future::Future;
use std::sync::Arc;

use crate::cache::{CacheConfig, CacheKey, TtlCache};
use crate::error::{ThrottleError, ThrottleResult};
use crate::rate_limit::{AdmissionGate, SlidingWindowGate};
use crate::throttle::Throttle;

#[derive(Debug)]
pub struct RateLimitedCache<V, G = SlidingWindowGate> {
    name: &'static str,
    cache: TtlCache<V>,
    throttle: Arc<Throttle<G>>,
}

impl<V, G> RateLimitedCache<V, G>
where
    V: Clone,
    G: AdmissionGate,
{
    pub fn new(
        name: &'static str,
        config: CacheConfig,
        throttle: Arc<Throttle<G>>,
    ) -> ThrottleResult<Self> {
        Ok(Self {
            name,
            cache: TtlCache::new(config)?,
            throttle,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn throttle(&self) -> &Arc<Throttle<G>> {
        &self.throttle
    }

    /// Cached value, if present and fresh
    pub async fn cached(&self, key: &CacheKey) -> Option<V> {
        self.cache.get(key.as_str()).await
    }

    /// Store a value obtained outside the throttle
    pub async fn store(&self, key: &CacheKey, value: V) {
        self.cache.put(key.as_str(), value).await;
    }

    /// Run `op` through the throttle and cache its result when it succeeds
    pub async fn fetch<E, F, Fut>(&self, key: &CacheKey, op: F) -> Result<V, E>
    where
        E: From<ThrottleError>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let value = self.throttle.run(op).await?;
        self.cache.put(key.as_str(), value.clone()).await;
        Ok(value)
    }

    /// Serve from cache, falling back to a metered `op` on a miss
    pub async fn get_or_fetch<E, F, Fut>(&self, key: &CacheKey, op: F) -> Result<V, E>
    where
        E: From<ThrottleError>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.cached(key).await {
            tracing::debug!(cache = self.name, key = %key, "Cache hit");
            return Ok(value);
        }

        tracing::debug!(cache = self.name, key = %key, "Cache miss, calling upstream");
        self.fetch(key, op).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::throttle::Serialization;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::Instant;

    /// Admits everything and counts the calls
    #[derive(Debug, Default)]
    struct RecordingGate {
        admits: AtomicUsize,
    }

    impl AdmissionGate for RecordingGate {
        async fn admit(&self) -> ThrottleResult<Instant> {
            self.admits.fetch_add(1, Ordering::SeqCst);
            Ok(Instant::now())
        }
    }

    #[derive(Debug, PartialEq)]
    enum FetchError {
        Throttle(ThrottleError),
        Upstream,
    }

    impl From<ThrottleError> for FetchError {
        fn from(err: ThrottleError) -> Self {
            FetchError::Throttle(err)
        }
    }

    fn recording_cache(ttl_secs: u64) -> RateLimitedCache<String, RecordingGate> {
        let throttle = Arc::new(Throttle::new(
            RecordingGate::default(),
            Serialization::Exclusive,
        ));
        RateLimitedCache::new(
            "test",
            CacheConfig {
                ttl: Duration::from_secs(ttl_secs),
                housekeeping_interval: Duration::from_secs(3600),
            },
            throttle,
        )
        .unwrap()
    }

    fn admits(cache: &RateLimitedCache<String, RecordingGate>) -> usize {
        cache.throttle().gate().admits.load(Ordering::SeqCst)
    }

    #[tokio::test(start_paused = true)]
    async fn test_hit_does_not_consume_admission() {
        let cache = recording_cache(60);
        let key = CacheKey::new("web_search").arg("acme").arg("5");

        let first: Result<_, FetchError> = cache
            .get_or_fetch(&key, || async { Ok("fresh".to_string()) })
            .await;
        assert_eq!(first.unwrap(), "fresh");
        assert_eq!(admits(&cache), 1);

        let second: Result<_, FetchError> = cache
            .get_or_fetch(&key, || async { Ok("never".to_string()) })
            .await;
        assert_eq!(second.unwrap(), "fresh");
        assert_eq!(admits(&cache), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_is_refetched() {
        let cache = recording_cache(10);
        let key = CacheKey::new("op").arg("x");

        let _: Result<_, FetchError> = cache
            .get_or_fetch(&key, || async { Ok("v1".to_string()) })
            .await;
        tokio::time::advance(Duration::from_secs(11)).await;
        let refreshed: Result<_, FetchError> = cache
            .get_or_fetch(&key, || async { Ok("v2".to_string()) })
            .await;

        assert_eq!(refreshed.unwrap(), "v2");
        assert_eq!(admits(&cache), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_errors_are_not_cached() {
        let cache = recording_cache(60);
        let key = CacheKey::new("op").arg("x");

        let failed = cache
            .get_or_fetch(&key, || async { Err::<String, _>(FetchError::Upstream) })
            .await;
        assert_eq!(failed, Err(FetchError::Upstream));
        assert!(cache.cached(&key).await.is_none());

        let retried: Result<_, FetchError> = cache
            .get_or_fetch(&key, || async { Ok("ok".to_string()) })
            .await;
        assert_eq!(retried.unwrap(), "ok");
        assert_eq!(admits(&cache), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_caches_share_one_budget() {
        let gate = SlidingWindowGate::new(crate::rate_limit::RateLimitConfig::new(2, 60))
            .unwrap()
            .with_max_wait(Duration::from_secs(1));
        let throttle = Arc::new(Throttle::new(gate, Serialization::Exclusive));

        let registrations: RateLimitedCache<u32> =
            RateLimitedCache::new("registrations", CacheConfig::default(), throttle.clone())
                .unwrap();
        let licenses: RateLimitedCache<u32> =
            RateLimitedCache::new("licenses", CacheConfig::default(), throttle.clone()).unwrap();

        let a: Result<_, FetchError> = registrations
            .get_or_fetch(&CacheKey::new("a"), || async { Ok(1) })
            .await;
        let b: Result<_, FetchError> = licenses
            .get_or_fetch(&CacheKey::new("b"), || async { Ok(2) })
            .await;
        assert!(a.is_ok() && b.is_ok());

        let c: Result<u32, FetchError> = licenses
            .get_or_fetch(&CacheKey::new("c"), || async { Ok(3) })
            .await;
        assert!(matches!(
            c,
            Err(FetchError::Throttle(ThrottleError::WaitTimeout { .. }))
        ));
        assert_eq!(throttle.gate().remaining().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_bypasses_gate() {
        let cache = recording_cache(60);
        let key = CacheKey::new("op").arg("fallback");
        cache.store(&key, "stored".to_string()).await;
        assert_eq!(cache.cached(&key).await.as_deref(), Some("stored"));
        assert_eq!(admits(&cache), 0);
    }
}
