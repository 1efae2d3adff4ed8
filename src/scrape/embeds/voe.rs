//! VOE embed resolver.
//!
//! VOE serves its player from a rotating mirror domain; the public
//! `voe.sx/e/{id}` URLs redirect there. The player page inlines the HLS
//! manifest URL as the `'hls'` entry of the player setup object.

use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::http_client::ScraperClient;

/// Current VOE mirror host. Rotates every few months.
const VOE_MIRROR: &str = "brookethoughi.com";

static HLS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"'hls':\s*'([^']+)'").expect("valid hls regex"));

/// Resolves `voe.sx` embed URLs to their HLS manifest.
pub struct VoeResolver {
    client: ScraperClient,
}

impl VoeResolver {
    #[must_use]
    pub fn new(client: ScraperClient) -> Self {
        Self { client }
    }

    /// `true` if this resolver handles the given embed URL.
    #[must_use]
    pub fn matches(url: &str) -> bool {
        url.contains("voe.sx/e/") || url.contains(&format!("{VOE_MIRROR}/e/"))
    }

    /// Rewrite a public embed URL onto the current mirror host.
    fn mirror_url(url: &str) -> String {
        url.replace("voe.sx", VOE_MIRROR)
    }

    /// Fetch the embed page and extract the HLS manifest URL.
    pub async fn resolve(&self, embed_url: &str) -> Result<String> {
        let url = Self::mirror_url(embed_url);
        if !url.starts_with(&format!("https://{VOE_MIRROR}/e/")) {
            return Err(anyhow!("not a VOE embed URL: {embed_url}"));
        }

        let resp = self
            .client
            .get(&url)
            .header("Referer", format!("https://{VOE_MIRROR}/"))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(anyhow!("VOE embed returned {}", resp.status()));
        }

        let html = resp.text().await?;
        extract_hls(&html).ok_or_else(|| anyhow!("no hls entry in VOE player page"))
    }
}

fn extract_hls(html: &str) -> Option<String> {
    HLS_RE
        .captures(html)
        .map(|caps| caps[1].to_string())
}
