//! FrEmbed provider.
//!
//! French-language mirror catalog; movie mode only. The API response is a
//! flat object whose `link1`..`linkN` fields each carry one mirror URL, so it
//! is parsed dynamically rather than with a fixed struct.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;

use crate::http_client::ScraperClient;
use crate::scrape::provider::{FetchContext, SourceProvider, SourceResult, Stream};
use crate::scrape::request::MediaRequest;

const FREMBED_BASE: &str = "https://frembed.fun";

pub struct FrEmbed {
    client: ScraperClient,
}

impl FrEmbed {
    #[must_use]
    pub fn new(client: ScraperClient) -> Self {
        Self { client }
    }

    fn api_url(media_id: &str) -> String {
        format!("{FREMBED_BASE}/api/films?id={media_id}")
    }

    fn collect_links(body: &Value) -> Vec<Stream> {
        let mut streams = Vec::new();
        let Some(object) = body.as_object() else {
            return streams;
        };

        // Mirror fields are link1, link2, ... with no guaranteed upper bound.
        let mut index = 1;
        while let Some(link) = object.get(&format!("link{index}")) {
            if let Some(url) = link.as_str() {
                if !url.is_empty() {
                    streams.push(Stream {
                        url: url.to_string(),
                        quality: None,
                        language: Some("fr".to_string()),
                        server: Some(format!("frembed-{index}")),
                    });
                }
            }
            index += 1;
        }

        streams
    }
}

#[async_trait]
impl SourceProvider for FrEmbed {
    fn name(&self) -> &'static str {
        "frembed"
    }

    fn applies_to(&self, request: &MediaRequest) -> bool {
        request.is_movie()
    }

    async fn fetch(&self, cx: &FetchContext) -> Result<SourceResult> {
        let resp = self
            .client
            .get(&Self::api_url(&cx.request.media_id))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(anyhow!("FrEmbed returned {}", resp.status()));
        }

        let body: Value = resp.json().await?;
        Ok(SourceResult::new(self.name(), Self::collect_links(&body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn collects_sequential_link_fields() {
        let body = json!({
            "id": 550,
            "link1": "https://mirror-a.example/embed/550",
            "link2": "https://mirror-b.example/embed/550",
            "link3": "",
            "version": "VF",
        });

        let streams = FrEmbed::collect_links(&body);
        assert_eq!(streams.len(), 2);
        assert_eq!(streams[0].language.as_deref(), Some("fr"));
        assert_eq!(streams[1].server.as_deref(), Some("frembed-2"));
    }

    #[test]
    fn stops_at_the_first_gap() {
        let body = json!({ "link1": "https://a.example", "link3": "https://c.example" });
        assert_eq!(FrEmbed::collect_links(&body).len(), 1);
    }

    #[test]
    fn movie_only() {
        let provider = FrEmbed::new(ScraperClient::new().unwrap());
        assert!(provider.applies_to(&MediaRequest::movie("550", "0.0.0.0")));
        assert!(!provider.applies_to(&MediaRequest::episode("1396", 1, 1, "0.0.0.0")));
    }
}
