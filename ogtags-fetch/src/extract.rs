//! Open Graph tag extraction.
//!
//! Each of the four properties is looked up independently with a
//! `meta[property="og:*"]` selector. Matches are visited in document order
//! and every element that carries a `content` attribute overwrites the value
//! seen so far, so the last tag in the document wins.

use scraper::{Html, Selector};

use ogtags_core::constants::{OG_DESCRIPTION, OG_IMAGE, OG_TITLE, OG_URL};
use ogtags_core::OgTags;

/// Extract Open Graph tags from an HTML document.
///
/// Missing tags leave the corresponding field empty. Values are copied
/// verbatim from the parsed `content` attribute.
pub fn extract_tags(html: &str) -> OgTags {
    let document = Html::parse_document(html);

    OgTags {
        title: last_content(&document, OG_TITLE),
        description: last_content(&document, OG_DESCRIPTION),
        image: last_content(&document, OG_IMAGE),
        url: last_content(&document, OG_URL),
    }
}

/// Value of the last `content` attribute among `<meta property=...>` matches.
fn last_content(document: &Html, property: &str) -> String {
    let Ok(selector) = Selector::parse(&format!(r#"meta[property="{property}"]"#)) else {
        return String::new();
    };

    let mut value = String::new();
    for element in document.select(&selector) {
        if let Some(content) = element.value().attr("content") {
            value = content.to_string();
        }
    }
    value
}
