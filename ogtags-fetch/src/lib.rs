//! Page fetching and Open Graph tag extraction.
//!
//! [`extract_tags`] is a pure function over HTML text; [`HttpPageFetcher`]
//! performs the GET, checks the status and feeds the body to the extractor.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod extract;
pub mod fetcher;

pub use extract::extract_tags;
pub use fetcher::{FetcherConfig, HttpPageFetcher};
