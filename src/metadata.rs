//! Title resolution against the TMDB catalog.
//!
//! One provider searches its site by human-readable title rather than TMDB
//! id; the selector uses this lookup to satisfy that prerequisite. A failed
//! lookup only excludes that provider, so errors here are soft by design.

use std::time::Instant;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::http_client::ScraperClient;

const TMDB_API_BASE: &str = "https://api.themoviedb.org/3";

/// A catalog that can turn a media id into a human-readable title.
#[async_trait]
pub trait TitleCatalog: Send + Sync {
    /// Resolve the original title for `media_id`.
    async fn resolve_title(&self, media_id: &str) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct TmdbMovie {
    original_title: String,
}

/// TMDB-backed [`TitleCatalog`], keyed by a fixed API credential.
pub struct TmdbCatalog {
    client: ScraperClient,
    api_key: String,
    base_url: String,
}

impl TmdbCatalog {
    #[must_use]
    pub fn new(client: ScraperClient, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: TMDB_API_BASE.to_string(),
        }
    }

    /// Point the catalog at a different API host (used by tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl TitleCatalog for TmdbCatalog {
    async fn resolve_title(&self, media_id: &str) -> Result<String> {
        let url = format!(
            "{}/movie/{}?api_key={}",
            self.base_url, media_id, self.api_key
        );

        let start = Instant::now();
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();

        if !status.is_success() {
            return Err(anyhow!("TMDB returned {status} for id {media_id}"));
        }

        let movie: TmdbMovie = resp.json().await?;
        debug!(
            media_id,
            title = %movie.original_title,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "resolved title"
        );

        Ok(movie.original_title)
    }
}
