//! App state: cache handle, page fetcher, config.

use std::sync::Arc;
use std::time::Duration;

use ogtags_cache::MetadataCache;
use ogtags_core::constants::{DEFAULT_CACHE_OP_TIMEOUT, DEFAULT_FETCH_TIMEOUT, DEFAULT_REDIS_URL};
use ogtags_core::{OgError, PageFetcher};
use ogtags_fetch::{FetcherConfig, HttpPageFetcher};

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Cache store address, `memory://` for the in-process store.
    pub redis_url: String,
    /// Bound on an outbound page fetch.
    pub fetch_timeout: Duration,
    /// Bound on a single cache get/set.
    pub cache_op_timeout: Duration,
    /// Whether to add a permissive CORS layer.
    pub enable_cors: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            redis_url: DEFAULT_REDIS_URL.into(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            cache_op_timeout: DEFAULT_CACHE_OP_TIMEOUT,
            enable_cors: true,
        }
    }
}

impl ApiConfig {
    /// Reads configuration from the environment, loading `.env` first.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let defaults = Self::default();

        Self {
            redis_url: std::env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            fetch_timeout: std::env::var("FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.fetch_timeout),
            cache_op_timeout: std::env::var("CACHE_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.cache_op_timeout),
            enable_cors: std::env::var("ENABLE_CORS")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(defaults.enable_cors),
        }
    }
}

/// Shared per-process state, built once at startup.
pub struct AppState {
    pub config: ApiConfig,
    pub cache: MetadataCache,
    pub fetcher: Arc<dyn PageFetcher>,
}

impl AppState {
    /// Connects to the cache store and builds the HTTP fetcher.
    ///
    /// Fails if the store does not answer the startup probe.
    pub async fn connect(config: ApiConfig) -> Result<Self, OgError> {
        let cache = MetadataCache::connect(&config.redis_url)
            .await?
            .with_op_timeout(config.cache_op_timeout);
        let fetcher = HttpPageFetcher::with_config(FetcherConfig {
            timeout: config.fetch_timeout,
        })?;

        Ok(Self::with_parts(config, cache, Arc::new(fetcher)))
    }

    /// Assembles state from already-built parts.
    pub fn with_parts(
        config: ApiConfig,
        cache: MetadataCache,
        fetcher: Arc<dyn PageFetcher>,
    ) -> Self {
        Self {
            config,
            cache,
            fetcher,
        }
    }
}
