//! Shared HTTP client tuned for scraping third-party streaming sites.
//!
//! Features:
//! - Browser-like default headers (providers block obvious bots)
//! - Brotli/Gzip/Deflate decompression (auto-negotiated)
//! - Cookie jar (some embed hosts set session cookies across redirects)
//! - Connection pooling with keep-alive
//! - Connect and total timeouts so a dead host fails fast

use std::time::Duration;

use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response};
use tracing::debug;

const CHROME_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// HTTP client shared by every provider adapter.
///
/// Cheap to clone; all clones share one connection pool and cookie store.
#[derive(Clone)]
pub struct ScraperClient {
    client: Client,
}

impl ScraperClient {
    /// Create a new scraping client with browser-like defaults.
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-GB,en;q=0.6"));
        headers.insert(USER_AGENT, HeaderValue::from_static(CHROME_UA));

        let client = Client::builder()
            .default_headers(headers)
            .use_rustls_tls()
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .cookie_store(true)
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .tcp_nodelay(true)
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self { client })
    }

    /// Start a GET request against `url`.
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.client.get(url)
    }

    /// Fetch a URL and return the raw response.
    pub async fn fetch(&self, url: &str) -> Result<Response> {
        debug!(url, "fetching");
        let response = self.client.get(url).send().await?;
        debug!(status = %response.status(), url, "response received");
        Ok(response)
    }

    /// Fetch a URL and return the body as text.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self.fetch(url).await?;
        let text = response.text().await?;
        Ok(text)
    }

    /// Get the underlying reqwest client.
    #[must_use]
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

impl Default for ScraperClient {
    fn default() -> Self {
        Self::new().expect("Failed to create default scraper client")
    }
}
