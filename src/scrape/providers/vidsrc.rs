//! VidSrc provider.
//!
//! Serves both movies and episodes. The embed page carries a numeric
//! `data-id` for the active media; a follow-up call to the sources endpoint
//! lists the available mirror servers for that id.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::http_client::ScraperClient;
use crate::scrape::provider::{FetchContext, SourceProvider, SourceResult, Stream};
use crate::scrape::request::MediaRequest;

const VIDSRC_BASE: &str = "https://vidsrc.to";

static DATA_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"data-id="(\d+)""#).expect("valid data-id regex"));

#[derive(Debug, Deserialize)]
struct SourcesResponse {
    result: Vec<SourceEntry>,
}

#[derive(Debug, Deserialize)]
struct SourceEntry {
    id: String,
    title: String,
}

pub struct VidSrc {
    client: ScraperClient,
}

impl VidSrc {
    #[must_use]
    pub fn new(client: ScraperClient) -> Self {
        Self { client }
    }

    fn embed_url(request: &MediaRequest) -> String {
        match &request.episode {
            Some(ep) => format!(
                "{VIDSRC_BASE}/embed/tv/{}/{}/{}",
                request.media_id, ep.season, ep.episode
            ),
            None => format!("{VIDSRC_BASE}/embed/movie/{}", request.media_id),
        }
    }

    fn sources_url(data_id: &str) -> String {
        format!("{VIDSRC_BASE}/ajax/embed/episode/{data_id}/sources")
    }

    fn extract_data_id(html: &str) -> Option<String> {
        DATA_ID_RE.captures(html).map(|caps| caps[1].to_string())
    }
}

#[async_trait]
impl SourceProvider for VidSrc {
    fn name(&self) -> &'static str {
        "vidsrc"
    }

    fn applies_to(&self, _request: &MediaRequest) -> bool {
        true
    }

    async fn fetch(&self, cx: &FetchContext) -> Result<SourceResult> {
        let embed_url = Self::embed_url(&cx.request);
        let html = self.client.fetch_text(&embed_url).await?;
        let data_id = Self::extract_data_id(&html)
            .ok_or_else(|| anyhow!("no data-id on embed page for {}", cx.request.media_id))?;

        let resp = self
            .client
            .get(&Self::sources_url(&data_id))
            .header("Referer", embed_url)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(anyhow!("sources endpoint returned {}", resp.status()));
        }

        let sources: SourcesResponse = resp.json().await?;
        let streams = sources
            .result
            .into_iter()
            .map(|entry| Stream {
                url: format!("{VIDSRC_BASE}/ajax/embed/source/{}", entry.id),
                quality: None,
                language: None,
                server: Some(entry.title),
            })
            .collect();

        Ok(SourceResult::new(self.name(), streams))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embed_url_shapes() {
        let movie = MediaRequest::movie("550", "203.0.113.7");
        assert_eq!(VidSrc::embed_url(&movie), "https://vidsrc.to/embed/movie/550");

        let episode = MediaRequest::episode("1396", 1, 3, "203.0.113.7");
        assert_eq!(
            VidSrc::embed_url(&episode),
            "https://vidsrc.to/embed/tv/1396/1/3"
        );
    }

    #[test]
    fn data_id_extraction() {
        let html = r#"<a data-id="114823" class="episode active">"#;
        assert_eq!(VidSrc::extract_data_id(html).as_deref(), Some("114823"));
        assert_eq!(VidSrc::extract_data_id("<html></html>"), None);
    }

    #[test]
    fn applies_to_both_modes() {
        let provider = VidSrc::new(ScraperClient::new().unwrap());
        assert!(provider.applies_to(&MediaRequest::movie("550", "0.0.0.0")));
        assert!(provider.applies_to(&MediaRequest::episode("1396", 1, 1, "0.0.0.0")));
    }
}
