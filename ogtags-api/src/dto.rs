//! Request/response types for the API.

use serde::{Deserialize, Serialize};

/// Query string of `GET /get_tags`.
#[derive(Debug, Default)]
pub struct GetTagsParams {
    /// Page to extract tags from. Also the cache key, unnormalized.
    pub url: Option<String>,
}

impl GetTagsParams {
    /// Builds params from decoded query pairs. A repeated `url` keeps its
    /// first value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self {
            url: pairs.into_iter().find(|(k, _)| k == "url").map(|(_, v)| v),
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub cache: String,
}
