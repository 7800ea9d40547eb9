//! TTL cache for Open Graph metadata.
//!
//! [`MetadataCache`] wraps any [`CacheStore`](ogtags_core::CacheStore) and
//! reports lookups as [`CacheLookup`] so that a failing store is never read as
//! a miss. Two stores ship with the crate: [`RedisStore`] for production and
//! [`MemoryStore`] for tests and single-process setups.

mod memory;
mod metadata;
mod redis_store;

pub use memory::{MemoryStore, MemoryStoreConfig};
pub use metadata::{CacheLookup, MetadataCache};
pub use redis_store::RedisStore;
