//! # ogtags Core
//!
//! Core types, errors, and traits shared by the ogtags crates.
//!
//! - **Types**: the [`OgTags`] metadata record and its JSON wire format
//! - **Errors**: fetch, cache, and request-level error taxonomy
//! - **Constants**: cache TTL and timeout defaults
//! - **Traits**: [`CacheStore`] and [`PageFetcher`] seams used by the handler
//!
//! ## Example
//!
//! ```rust
//! use ogtags_core::OgTags;
//!
//! let tags = OgTags::new("Title", "", "", "https://example.com/");
//! let json = serde_json::to_string(&tags).unwrap();
//! assert!(json.contains("\"URL\":\"https://example.com/\""));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{CacheError, FetchError, OgError, Result};
pub use traits::*;
pub use types::*;
