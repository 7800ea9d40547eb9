//! The Open Graph metadata record.

use serde::{Deserialize, Serialize};

/// Open Graph metadata extracted from a single page.
///
/// Every field is optional in the source document; a missing tag is
/// represented by the empty string. The JSON form uses the keys `Title`,
/// `Description`, `Image` and `URL`, and is also the value stored in the cache.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OgTags {
    /// Content of the last `og:title` tag.
    #[serde(rename = "Title")]
    pub title: String,
    /// Content of the last `og:description` tag.
    #[serde(rename = "Description")]
    pub description: String,
    /// Content of the last `og:image` tag.
    #[serde(rename = "Image")]
    pub image: String,
    /// Content of the last `og:url` tag.
    #[serde(rename = "URL")]
    pub url: String,
}

impl OgTags {
    /// Creates a record from its four field values.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            image: image.into(),
            url: url.into(),
        }
    }

    /// Returns true if no tag was found.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.description.is_empty()
            && self.image.is_empty()
            && self.url.is_empty()
    }

    /// Serializes to the wire/cache JSON format.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parses a record previously produced by [`OgTags::to_json`].
    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}
