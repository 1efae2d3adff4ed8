//! DreamFilm provider.
//!
//! Plain JSON API keyed by TMDB id; serves both movies and episodes.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::http_client::ScraperClient;
use crate::scrape::provider::{FetchContext, SourceProvider, SourceResult, Stream};
use crate::scrape::request::MediaRequest;

const DREAMFILM_BASE: &str = "https://dreamfilmsw.net";

#[derive(Debug, Deserialize)]
struct MediaResponse {
    streams: Vec<StreamEntry>,
}

#[derive(Debug, Deserialize)]
struct StreamEntry {
    file: String,
    #[serde(default)]
    label: Option<String>,
}

pub struct DreamFilm {
    client: ScraperClient,
}

impl DreamFilm {
    #[must_use]
    pub fn new(client: ScraperClient) -> Self {
        Self { client }
    }

    fn api_url(request: &MediaRequest) -> String {
        match &request.episode {
            Some(ep) => format!(
                "{DREAMFILM_BASE}/api/v1/media/{}?season={}&episode={}",
                request.media_id, ep.season, ep.episode
            ),
            None => format!("{DREAMFILM_BASE}/api/v1/media/{}", request.media_id),
        }
    }
}

#[async_trait]
impl SourceProvider for DreamFilm {
    fn name(&self) -> &'static str {
        "dreamfilm"
    }

    fn applies_to(&self, _request: &MediaRequest) -> bool {
        true
    }

    async fn fetch(&self, cx: &FetchContext) -> Result<SourceResult> {
        let resp = self.client.get(&Self::api_url(&cx.request)).send().await?;
        if !resp.status().is_success() {
            return Err(anyhow!("DreamFilm API returned {}", resp.status()));
        }

        let media: MediaResponse = resp.json().await?;
        let streams = media
            .streams
            .into_iter()
            .map(|entry| Stream {
                url: entry.file,
                quality: entry.label,
                language: None,
                server: None,
            })
            .collect();

        Ok(SourceResult::new(self.name(), streams))
    }
}
