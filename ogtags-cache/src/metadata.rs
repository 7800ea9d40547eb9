//! Metadata cache: URL → serialized [`OgTags`](ogtags_core::OgTags) with a fixed TTL.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use ogtags_core::constants::{
    CACHE_TTL, DEFAULT_CACHE_OP_TIMEOUT, MEMORY_STORE_SCHEME, STARTUP_PROBE_TIMEOUT,
};
use ogtags_core::{CacheError, CacheStore};

use crate::memory::MemoryStore;
use crate::redis_store::RedisStore;

/// Outcome of a cache lookup.
///
/// A store failure is its own variant so it can never be mistaken for a miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    /// Serialized record, exactly as stored.
    Hit(String),
    /// No live entry for the key.
    Miss,
    /// The store failed for a reason other than a missing key.
    StoreError(CacheError),
}

/// Long-lived cache handle shared by all requests.
#[derive(Clone)]
pub struct MetadataCache {
    store: Arc<dyn CacheStore>,
    ttl: Duration,
    op_timeout: Duration,
}

impl MetadataCache {
    /// Wraps an existing store.
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self {
            store,
            ttl: CACHE_TTL,
            op_timeout: DEFAULT_CACHE_OP_TIMEOUT,
        }
    }

    /// Sets the bound applied to every get/set.
    pub fn with_op_timeout(mut self, op_timeout: Duration) -> Self {
        self.op_timeout = op_timeout;
        self
    }

    /// Opens the store at `url` and checks it answers within
    /// [`STARTUP_PROBE_TIMEOUT`].
    ///
    /// `memory://` selects an in-process store; anything else is handed to
    /// redis.
    pub async fn connect(url: &str) -> Result<Self, CacheError> {
        let probe = async {
            let store: Arc<dyn CacheStore> = if url.starts_with(MEMORY_STORE_SCHEME) {
                Arc::new(MemoryStore::new())
            } else {
                Arc::new(RedisStore::connect(url).await?)
            };
            store.ping().await?;
            Ok::<_, CacheError>(store)
        };

        let store = tokio::time::timeout(STARTUP_PROBE_TIMEOUT, probe)
            .await
            .map_err(|_| CacheError::Timeout(STARTUP_PROBE_TIMEOUT))??;

        info!(url, "Cache store is reachable");
        Ok(Self::new(store))
    }

    /// Looks up the serialized record for `key`.
    pub async fn lookup(&self, key: &str) -> CacheLookup {
        match self.bounded(self.store.get(key)).await {
            Ok(Some(value)) => {
                debug!(key, "Cache hit");
                CacheLookup::Hit(value)
            }
            Ok(None) => {
                debug!(key, "Cache miss");
                CacheLookup::Miss
            }
            Err(e) => CacheLookup::StoreError(e),
        }
    }

    /// Stores a serialized record under `key` for the cache TTL.
    pub async fn store(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.bounded(self.store.set_with_ttl(key, value, self.ttl)).await
    }

    /// Liveness probe against the underlying store.
    pub async fn ping(&self) -> Result<(), CacheError> {
        self.bounded(self.store.ping()).await
    }

    async fn bounded<T>(
        &self,
        op: impl Future<Output = Result<T, CacheError>>,
    ) -> Result<T, CacheError> {
        tokio::time::timeout(self.op_timeout, op)
            .await
            .map_err(|_| CacheError::Timeout(self.op_timeout))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Store whose every call fails with a connection error.
    struct DownStore;

    #[async_trait]
    impl CacheStore for DownStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
            Err(CacheError::Connection("connection refused".into()))
        }

        async fn set_with_ttl(
            &self,
            _key: &str,
            _value: &str,
            _ttl: Duration,
        ) -> Result<(), CacheError> {
            Err(CacheError::Connection("connection refused".into()))
        }

        async fn ping(&self) -> Result<(), CacheError> {
            Err(CacheError::Connection("connection refused".into()))
        }
    }

    /// Store that never answers in time.
    struct SlowStore;

    #[async_trait]
    impl CacheStore for SlowStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
            tokio::time::sleep(Duration::from_secs(1)).await;
            Ok(None)
        }

        async fn set_with_ttl(
            &self,
            _key: &str,
            _value: &str,
            _ttl: Duration,
        ) -> Result<(), CacheError> {
            tokio::time::sleep(Duration::from_secs(1)).await;
            Ok(())
        }

        async fn ping(&self) -> Result<(), CacheError> {
            Ok(())
        }
    }

    /// Store that remembers the expiry of every write.
    #[derive(Default)]
    struct RecordingStore {
        ttls: parking_lot::Mutex<Vec<Duration>>,
    }

    #[async_trait]
    impl CacheStore for RecordingStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
            Ok(None)
        }

        async fn set_with_ttl(
            &self,
            _key: &str,
            _value: &str,
            ttl: Duration,
        ) -> Result<(), CacheError> {
            self.ttls.lock().push(ttl);
            Ok(())
        }

        async fn ping(&self) -> Result<(), CacheError> {
            Ok(())
        }
    }

    fn memory_cache() -> MetadataCache {
        MetadataCache::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_lookup_miss_then_hit() {
        let cache = memory_cache();
        assert_eq!(cache.lookup("https://a.test/").await, CacheLookup::Miss);

        cache.store("https://a.test/", r#"{"Title":"A"}"#).await.unwrap();
        assert_eq!(
            cache.lookup("https://a.test/").await,
            CacheLookup::Hit(r#"{"Title":"A"}"#.into())
        );
    }

    #[tokio::test]
    async fn test_store_uses_ten_minute_ttl() {
        let store = Arc::new(RecordingStore::default());
        let cache = MetadataCache::new(store.clone());

        cache.store("https://a.test/", "{}").await.unwrap();
        cache.store("https://b.test/", "{}").await.unwrap();
        assert_eq!(*store.ttls.lock(), vec![Duration::from_secs(600); 2]);
    }

    #[tokio::test]
    async fn test_store_error_is_not_a_miss() {
        let cache = MetadataCache::new(Arc::new(DownStore));
        assert!(matches!(
            cache.lookup("https://a.test/").await,
            CacheLookup::StoreError(CacheError::Connection(_))
        ));
        assert!(cache.store("https://a.test/", "{}").await.is_err());
    }

    #[tokio::test]
    async fn test_slow_store_times_out() {
        let cache =
            MetadataCache::new(Arc::new(SlowStore)).with_op_timeout(Duration::from_millis(50));
        assert_eq!(
            cache.lookup("k").await,
            CacheLookup::StoreError(CacheError::Timeout(Duration::from_millis(50)))
        );
        assert_eq!(
            cache.store("k", "v").await,
            Err(CacheError::Timeout(Duration::from_millis(50)))
        );
    }

    #[tokio::test]
    async fn test_connect_memory() {
        let cache = MetadataCache::connect("memory://").await.unwrap();
        assert!(cache.ping().await.is_ok());
        assert_eq!(cache.lookup("x").await, CacheLookup::Miss);
    }

    #[tokio::test]
    async fn test_connect_fails_fast() {
        let started = std::time::Instant::now();
        let result = MetadataCache::connect("redis://127.0.0.1:1").await;
        assert!(result.is_err());
        assert!(started.elapsed() <= STARTUP_PROBE_TIMEOUT + Duration::from_secs(1));
    }
}
