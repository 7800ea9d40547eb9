//! HTTP page fetcher.
//!
//! One GET per call, no custom headers, the client's standard redirect
//! behavior, and a client-level timeout so a slow origin cannot hold the
//! request task forever.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};

use ogtags_core::constants::DEFAULT_FETCH_TIMEOUT;
use ogtags_core::error::{FetchError, OgError};
use ogtags_core::{OgTags, PageFetcher};

use crate::extract::extract_tags;

/// Fetcher configuration.
#[derive(Clone, Debug)]
pub struct FetcherConfig {
    /// Overall bound on a single fetch, connect through body.
    pub timeout: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

/// [`PageFetcher`] backed by a pooled `reqwest` client.
#[derive(Clone, Debug)]
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    /// Creates a fetcher with the default timeout.
    pub fn new() -> Result<Self, OgError> {
        Self::with_config(FetcherConfig::default())
    }

    /// Creates a fetcher with custom configuration.
    pub fn with_config(config: FetcherConfig) -> Result<Self, OgError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| OgError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<OgTags, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

        // Dropping the response on this path releases the connection.
        let status = response.status();
        if status != StatusCode::OK {
            debug!(status = status.as_u16(), "Rejected origin response");
            return Err(FetchError::BadStatus(status.as_u16()));
        }

        let html = response
            .text()
            .await
            .map_err(|e| FetchError::UnparseableBody(e.to_string()))?;

        let tags = extract_tags(&html);
        debug!(
            bytes = html.len(),
            empty = tags.is_empty(),
            "Extracted Open Graph tags"
        );
        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAGE: &str = r#"<html><head>
        <meta property="og:title" content="Hello">
        <meta property="og:description" content="World">
        <meta property="og:image" content="https://img.test/x.png">
        <meta property="og:url" content="https://site.test/hello">
        </head><body></body></html>"#;

    async fn server_with(status: u16, body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_raw(body.to_string(), "text/html; charset=utf-8"),
            )
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_fetch_ok() {
        let server = server_with(200, PAGE).await;
        let fetcher = HttpPageFetcher::new().unwrap();

        let tags = fetcher.fetch(&format!("{}/page", server.uri())).await.unwrap();
        assert_eq!(
            tags,
            OgTags::new("Hello", "World", "https://img.test/x.png", "https://site.test/hello")
        );
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let server = server_with(404, PAGE).await;
        let fetcher = HttpPageFetcher::new().unwrap();

        let err = fetcher.fetch(&format!("{}/page", server.uri())).await.unwrap_err();
        assert_eq!(err, FetchError::BadStatus(404));
    }

    #[tokio::test]
    async fn test_fetch_rejects_non_200_success() {
        let server = server_with(201, PAGE).await;
        let fetcher = HttpPageFetcher::new().unwrap();

        let err = fetcher.fetch(&format!("{}/page", server.uri())).await.unwrap_err();
        assert_eq!(err, FetchError::BadStatus(201));
    }

    #[tokio::test]
    async fn test_fetch_server_error() {
        let server = server_with(503, "").await;
        let fetcher = HttpPageFetcher::new().unwrap();

        let err = fetcher.fetch(&format!("{}/page", server.uri())).await.unwrap_err();
        assert_eq!(err, FetchError::BadStatus(503));
    }

    #[tokio::test]
    async fn test_fetch_follows_redirect() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(ResponseTemplate::new(301).insert_header("Location", "/page"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(PAGE, "text/html"))
            .mount(&server)
            .await;
        let fetcher = HttpPageFetcher::new().unwrap();

        let tags = fetcher.fetch(&format!("{}/old", server.uri())).await.unwrap();
        assert_eq!(tags.title, "Hello");
    }

    #[tokio::test]
    async fn test_fetch_malformed_url() {
        let fetcher = HttpPageFetcher::new().unwrap();
        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Bind then drop to get a port with nothing listening.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let fetcher = HttpPageFetcher::new().unwrap();

        let err = fetcher
            .fetch(&format!("http://127.0.0.1:{port}/"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(PAGE, "text/html")
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;
        let fetcher = HttpPageFetcher::with_config(FetcherConfig {
            timeout: Duration::from_millis(100),
        })
        .unwrap();

        let err = fetcher.fetch(&server.uri()).await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_fetch_truncated_body() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        // Promises 100 bytes, sends a few, then hangs up.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 100\r\n\r\n<html>",
                )
                .await
                .unwrap();
            socket.shutdown().await.unwrap();
        });
        let fetcher = HttpPageFetcher::new().unwrap();

        let err = fetcher.fetch(&format!("http://{addr}/")).await.unwrap_err();
        assert!(matches!(err, FetchError::UnparseableBody(_)));
    }
}
