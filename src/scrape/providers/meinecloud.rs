//! MeineCloud provider.
//!
//! German mirror catalog, movie mode only. The site is keyed by IMDB id, so
//! the TMDB external-ids endpoint is consulted first. Catalog pages link VOE
//! embeds, which are resolved to HLS manifests. The client IP is forwarded
//! because the site geo-filters its mirror list.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::http_client::ScraperClient;
use crate::scrape::embeds::VoeResolver;
use crate::scrape::provider::{FetchContext, SourceProvider, SourceResult, Stream};
use crate::scrape::request::MediaRequest;

const MEINECLOUD_BASE: &str = "https://meinecloud.click";
const TMDB_API_BASE: &str = "https://api.themoviedb.org/3";

static VOE_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https://voe\.sx/e/[A-Za-z0-9]+"#).expect("valid voe link regex"));

#[derive(Debug, Deserialize)]
struct ExternalIds {
    imdb_id: Option<String>,
}

pub struct MeineCloud {
    client: ScraperClient,
    resolver: VoeResolver,
    tmdb_api_key: String,
}

impl MeineCloud {
    #[must_use]
    pub fn new(client: ScraperClient, tmdb_api_key: impl Into<String>) -> Self {
        Self {
            resolver: VoeResolver::new(client.clone()),
            client,
            tmdb_api_key: tmdb_api_key.into(),
        }
    }

    async fn imdb_id(&self, media_id: &str) -> Result<String> {
        let url = format!(
            "{TMDB_API_BASE}/movie/{media_id}/external_ids?api_key={}",
            self.tmdb_api_key
        );
        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(anyhow!("TMDB external_ids returned {}", resp.status()));
        }

        let ids: ExternalIds = resp.json().await?;
        ids.imdb_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| anyhow!("no IMDB id for TMDB {media_id}"))
    }

    fn extract_embeds(html: &str) -> Vec<String> {
        let mut seen = Vec::new();
        for m in VOE_LINK_RE.find_iter(html) {
            let link = m.as_str().to_string();
            if !seen.contains(&link) {
                seen.push(link);
            }
        }
        seen
    }
}

#[async_trait]
impl SourceProvider for MeineCloud {
    fn name(&self) -> &'static str {
        "meinecloud"
    }

    fn applies_to(&self, request: &MediaRequest) -> bool {
        request.is_movie()
    }

    async fn fetch(&self, cx: &FetchContext) -> Result<SourceResult> {
        let imdb_id = self.imdb_id(&cx.request.media_id).await?;
        let page_url = format!("{MEINECLOUD_BASE}/movie/{imdb_id}");

        let resp = self
            .client
            .get(&page_url)
            .header("X-Forwarded-For", &cx.request.client_ip)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(anyhow!("MeineCloud returned {}", resp.status()));
        }

        let html = resp.text().await?;
        let mut streams = Vec::new();
        for embed in Self::extract_embeds(&html) {
            // A dead embed just shrinks the mirror list.
            match self.resolver.resolve(&embed).await {
                Ok(hls) => streams.push(Stream {
                    url: hls,
                    quality: None,
                    language: Some("de".to_string()),
                    server: Some("voe".to_string()),
                }),
                Err(e) => tracing::debug!(embed, error = %e, "VOE resolve failed"),
            }
        }

        Ok(SourceResult::new(self.name(), streams))
    }
}
