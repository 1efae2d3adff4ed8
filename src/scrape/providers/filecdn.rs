//! FileCDN provider.
//!
//! Serves both modes, but through distinct endpoints: movies by TMDB id,
//! episodes by id plus season/episode path segments.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::http_client::ScraperClient;
use crate::scrape::provider::{FetchContext, SourceProvider, SourceResult, Stream};
use crate::scrape::request::MediaRequest;

const FILECDN_BASE: &str = "https://filecdn.video";

#[derive(Debug, Deserialize)]
struct FileCdnResponse {
    sources: Vec<FileCdnSource>,
}

#[derive(Debug, Deserialize)]
struct FileCdnSource {
    url: String,
    #[serde(default)]
    quality: Option<String>,
}

pub struct FileCdn {
    client: ScraperClient,
}

impl FileCdn {
    #[must_use]
    pub fn new(client: ScraperClient) -> Self {
        Self { client }
    }

    fn api_url(request: &MediaRequest) -> String {
        match &request.episode {
            Some(ep) => format!(
                "{FILECDN_BASE}/api/tv/{}/{}/{}",
                request.media_id, ep.season, ep.episode
            ),
            None => format!("{FILECDN_BASE}/api/movie/{}", request.media_id),
        }
    }
}

#[async_trait]
impl SourceProvider for FileCdn {
    fn name(&self) -> &'static str {
        "filecdn"
    }

    fn applies_to(&self, _request: &MediaRequest) -> bool {
        true
    }

    async fn fetch(&self, cx: &FetchContext) -> Result<SourceResult> {
        let resp = self.client.get(&Self::api_url(&cx.request)).send().await?;
        if !resp.status().is_success() {
            return Err(anyhow!("FileCDN returned {}", resp.status()));
        }

        let body: FileCdnResponse = resp.json().await?;
        let streams = body
            .sources
            .into_iter()
            .map(|s| Stream {
                url: s.url,
                quality: s.quality,
                language: None,
                server: None,
            })
            .collect();

        Ok(SourceResult::new(self.name(), streams))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_and_tv_endpoints_differ() {
        let movie = MediaRequest::movie("550", "203.0.113.7");
        assert_eq!(FileCdn::api_url(&movie), "https://filecdn.video/api/movie/550");

        let episode = MediaRequest::episode("1396", 1, 1, "203.0.113.7");
        assert_eq!(
            FileCdn::api_url(&episode),
            "https://filecdn.video/api/tv/1396/1/1"
        );
    }
}
