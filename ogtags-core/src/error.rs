//! Error types for ogtags.
//!
//! Errors are split along the request flow: fetching the origin page,
//! talking to the cache store, and the request-level umbrella that decides
//! whether the caller or the service is at fault.

use std::time::Duration;

use thiserror::Error;

/// Result type alias using `OgError`.
pub type Result<T> = std::result::Result<T, OgError>;

// ═══════════════════════════════════════════════════════════════════════════════
// FETCH ERRORS
// ═══════════════════════════════════════════════════════════════════════════════

/// Failure to obtain metadata from the origin page.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The GET itself failed: malformed URL, DNS, refused connection, timeout.
    #[error("fetch error: invalid url: {0}")]
    InvalidUrl(String),

    /// The origin answered with anything other than 200.
    #[error("fetch error: invalid response: status {0}")]
    BadStatus(u16),

    /// The response body could not be read as HTML.
    #[error("fetch error: can't read body: {0}")]
    UnparseableBody(String),
}

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE ERRORS
// ═══════════════════════════════════════════════════════════════════════════════

/// Failure of the cache store. A missing key is never an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The store could not be reached or the connection dropped.
    #[error("cache connection failed: {0}")]
    Connection(String),

    /// The store rejected or failed the command.
    #[error("cache operation failed: {0}")]
    Operation(String),

    /// The operation did not complete within its bound.
    #[error("cache operation timed out after {0:?}")]
    Timeout(Duration),
}

// ═══════════════════════════════════════════════════════════════════════════════
// REQUEST ERRORS
// ═══════════════════════════════════════════════════════════════════════════════

/// Request-level error for the tag lookup flow.
#[derive(Debug, Error)]
pub enum OgError {
    /// The `url` parameter was missing or empty.
    #[error("Missing 'url' parameter")]
    MissingUrl,

    /// The origin page could not be fetched or read.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The cache store failed on lookup.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// The record could not be encoded.
    #[error("Error encoding JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl OgError {
    /// Returns true if the caller supplied a bad target (400-class).
    pub fn is_client_error(&self) -> bool {
        matches!(self, OgError::MissingUrl | OgError::Fetch(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert!(FetchError::BadStatus(404).to_string().contains("404"));
        assert!(CacheError::Timeout(Duration::from_secs(2))
            .to_string()
            .contains("2s"));
        assert_eq!(OgError::MissingUrl.to_string(), "Missing 'url' parameter");
    }

    #[test]
    fn test_error_classification() {
        assert!(OgError::MissingUrl.is_client_error());
        assert!(OgError::from(FetchError::BadStatus(500)).is_client_error());
        assert!(OgError::from(FetchError::InvalidUrl("nope".into())).is_client_error());
        assert!(!OgError::from(CacheError::Connection("down".into())).is_client_error());
        assert!(!OgError::Config("bad".into()).is_client_error());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_result: std::result::Result<serde_json::Value, _> =
            serde_json::from_str("invalid");
        let og_result: Result<serde_json::Value> = json_result.map_err(OgError::from);
        assert!(matches!(og_result, Err(OgError::Serialization(_))));
        assert!(!og_result.unwrap_err().is_client_error());
    }
}
