//! In-memory TTL store.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::RwLock;

use ogtags_core::{CacheError, CacheStore};

/// Cache entry with TTL.
#[derive(Clone)]
struct StoreEntry {
    value: String,
    inserted_at: Instant,
    ttl: Duration,
}

impl StoreEntry {
    fn is_expired(&self) -> bool {
        self.inserted_at.elapsed() >= self.ttl
    }
}

/// Memory store configuration.
#[derive(Clone, Debug)]
pub struct MemoryStoreConfig {
    /// Maximum number of entries
    pub max_entries: usize,
}

impl Default for MemoryStoreConfig {
    fn default() -> Self {
        Self { max_entries: 10_000 }
    }
}

/// Process-local [`CacheStore`].
///
/// Thread-safe; expired entries read as absent and are swept when the store
/// is full. When still full, the oldest entry is evicted.
pub struct MemoryStore {
    entries: RwLock<HashMap<String, StoreEntry>>,
    config: MemoryStoreConfig,
}

impl MemoryStore {
    /// Creates a store with default configuration.
    pub fn new() -> Self {
        Self::with_config(MemoryStoreConfig::default())
    }

    /// Creates a store with custom configuration.
    pub fn with_config(config: MemoryStoreConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn read(&self, key: &str) -> Option<String> {
        let entries = self.entries.read();
        entries
            .get(key)
            .filter(|e| !e.is_expired())
            .map(|e| e.value.clone())
    }

    fn write(&self, key: &str, value: &str, ttl: Duration) {
        let mut entries = self.entries.write();

        if !entries.contains_key(key) && entries.len() >= self.config.max_entries {
            entries.retain(|_, e| !e.is_expired());
            if entries.len() >= self.config.max_entries {
                if let Some(oldest_key) = entries
                    .iter()
                    .min_by_key(|(_, e)| e.inserted_at)
                    .map(|(k, _)| k.clone())
                {
                    entries.remove(&oldest_key);
                }
            }
        }

        entries.insert(
            key.to_string(),
            StoreEntry {
                value: value.to_string(),
                inserted_at: Instant::now(),
                ttl,
            },
        );
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.read(key))
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        self.write(key, value, ttl);
        Ok(())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        Ok(())
    }
}
