//! 2Embed provider.
//!
//! Movie mode only. The embed page wraps its player in an iframe; the iframe
//! `src` (absolute or protocol-relative) is the playable embed URL.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::http_client::ScraperClient;
use crate::scrape::provider::{FetchContext, SourceProvider, SourceResult, Stream};
use crate::scrape::request::MediaRequest;

const TWOEMBED_BASE: &str = "https://www.2embed.cc";

static IFRAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<iframe[^>]+src=["']([^"']+)["']"#).expect("valid iframe regex")
});

pub struct TwoEmbed {
    client: ScraperClient,
}

impl TwoEmbed {
    #[must_use]
    pub fn new(client: ScraperClient) -> Self {
        Self { client }
    }

    fn embed_url(media_id: &str) -> String {
        format!("{TWOEMBED_BASE}/embed/{media_id}")
    }

    /// Pull every iframe src off the page, resolved against the embed host.
    fn extract_players(html: &str) -> Vec<String> {
        let base = Url::parse(TWOEMBED_BASE).expect("valid base url");
        IFRAME_RE
            .captures_iter(html)
            .filter_map(|caps| base.join(&caps[1]).ok())
            .map(String::from)
            .collect()
    }
}

#[async_trait]
impl SourceProvider for TwoEmbed {
    fn name(&self) -> &'static str {
        "twoembed"
    }

    fn applies_to(&self, request: &MediaRequest) -> bool {
        request.is_movie()
    }

    async fn fetch(&self, cx: &FetchContext) -> Result<SourceResult> {
        let html = self
            .client
            .fetch_text(&Self::embed_url(&cx.request.media_id))
            .await?;

        let players = Self::extract_players(&html);
        if players.is_empty() {
            return Err(anyhow!("no player iframe on 2embed page"));
        }

        let streams = players
            .into_iter()
            .enumerate()
            .map(|(i, url)| Stream {
                url,
                quality: None,
                language: None,
                server: Some(format!("2embed-{}", i + 1)),
            })
            .collect();

        Ok(SourceResult::new(self.name(), streams))
    }
}
