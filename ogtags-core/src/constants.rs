//! Service constants for ogtags.

use std::time::Duration;

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE
// ═══════════════════════════════════════════════════════════════════════════════

/// Lifetime of a cached metadata record.
pub const CACHE_TTL: Duration = Duration::from_secs(10 * 60);

/// Bound on the startup ping against the cache store.
/// The process refuses to start if the store does not answer in time.
pub const STARTUP_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Default bound on a single cache get/set.
pub const DEFAULT_CACHE_OP_TIMEOUT: Duration = Duration::from_millis(2000);

/// Default cache store address.
pub const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";

/// Store URL scheme that selects the in-process memory store.
pub const MEMORY_STORE_SCHEME: &str = "memory://";

// ═══════════════════════════════════════════════════════════════════════════════
// FETCHING
// ═══════════════════════════════════════════════════════════════════════════════

/// Default bound on the outbound page fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

// ═══════════════════════════════════════════════════════════════════════════════
// OPEN GRAPH PROPERTIES
// ═══════════════════════════════════════════════════════════════════════════════

/// `property` value of the title tag.
pub const OG_TITLE: &str = "og:title";

/// `property` value of the description tag.
pub const OG_DESCRIPTION: &str = "og:description";

/// `property` value of the image tag.
pub const OG_IMAGE: &str = "og:image";

/// `property` value of the canonical URL tag.
pub const OG_URL: &str = "og:url";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_ttl_is_ten_minutes() {
        assert_eq!(CACHE_TTL.as_secs(), 600);
    }

    #[test]
    fn test_cache_op_timeout_below_probe_window() {
        assert!(DEFAULT_CACHE_OP_TIMEOUT < STARTUP_PROBE_TIMEOUT);
    }
}
