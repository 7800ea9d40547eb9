//! Common traits for ogtags.
//!
//! The request handler only talks to these seams, so the production redis
//! store and HTTP fetcher can be swapped for in-memory doubles in tests.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{CacheError, FetchError};
use crate::types::OgTags;

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE STORE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// A key-value store with per-entry expiration.
///
/// Implementations must be safe for concurrent use by many requests.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Reads a value. A missing or expired key is `Ok(None)`, never an error.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Writes a value that expires after `ttl`, replacing any previous one.
    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Liveness probe.
    async fn ping(&self) -> Result<(), CacheError>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// PAGE FETCHER TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Fetches a page and extracts its Open Graph tags.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Issues a single GET against `url` and extracts the tags from the body.
    async fn fetch(&self, url: &str) -> Result<OgTags, FetchError>;
}
