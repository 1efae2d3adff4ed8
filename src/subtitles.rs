//! Best-effort subtitle retrieval.
//!
//! Captions are fetched independently of the provider fan-out and merged into
//! the response afterwards. Any failure degrades to an empty list; subtitles
//! never gate a successful response.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::http_client::ScraperClient;
use crate::scrape::request::EpisodeRef;

/// One subtitle track.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Caption {
    /// Direct URL of the subtitle file.
    pub url: String,
    /// ISO 639-1 language code.
    pub language: String,
    /// Human-readable label (e.g., `"English (CC)"`).
    pub label: String,
}

#[derive(Debug, Deserialize)]
struct SubtitleEntry {
    url: String,
    language: String,
    #[serde(default)]
    display: Option<String>,
}

/// Client for the subtitle search API.
pub struct SubtitleClient {
    client: ScraperClient,
    base_url: String,
}

impl SubtitleClient {
    #[must_use]
    pub fn new(client: ScraperClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetch subtitle tracks for a media item.
    ///
    /// Returns an empty collection on any error; the failure is logged and
    /// the response proceeds without captions.
    pub async fn fetch(&self, media_id: &str, episode: Option<&EpisodeRef>) -> Vec<Caption> {
        match self.try_fetch(media_id, episode).await {
            Ok(captions) => {
                debug!(media_id, count = captions.len(), "subtitles fetched");
                captions
            }
            Err(e) => {
                warn!(media_id, error = %e, "subtitle fetch failed, continuing without captions");
                Vec::new()
            }
        }
    }

    async fn try_fetch(
        &self,
        media_id: &str,
        episode: Option<&EpisodeRef>,
    ) -> anyhow::Result<Vec<Caption>> {
        let url = match episode {
            Some(ep) => format!(
                "{}/search?id={}&season={}&episode={}",
                self.base_url, media_id, ep.season, ep.episode
            ),
            None => format!("{}/search?id={}", self.base_url, media_id),
        };

        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            anyhow::bail!("subtitle API returned {}", resp.status());
        }

        let entries: Vec<SubtitleEntry> = resp.json().await?;
        let captions = entries
            .into_iter()
            .map(|e| {
                let label = e.display.unwrap_or_else(|| e.language.clone());
                Caption {
                    url: e.url,
                    language: e.language,
                    label,
                }
            })
            .collect();

        Ok(captions)
    }
}
