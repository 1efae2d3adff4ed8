//! AZM.to provider.
//!
//! Movie mode only, and the only provider that searches by human-readable
//! title instead of TMDB id; the selector resolves the title before dispatch.
//! The site rate-limits per client, so the originating IP is forwarded.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::http_client::ScraperClient;
use crate::scrape::provider::{FetchContext, SourceProvider, SourceResult, Stream};
use crate::scrape::request::MediaRequest;

const AZMTO_BASE: &str = "https://azm.to";

static EMBED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"data-embed=["']([^"']+)["']"#).expect("valid embed regex")
});

#[derive(Debug, Deserialize)]
struct SearchResults {
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
    slug: String,
}

pub struct AzmTo {
    client: ScraperClient,
}

impl AzmTo {
    #[must_use]
    pub fn new(client: ScraperClient) -> Self {
        Self { client }
    }

    fn search_url(title: &str) -> String {
        format!("{AZMTO_BASE}/api/search?q={}", urlencoding::encode(title))
    }

    fn watch_url(slug: &str) -> String {
        format!("{AZMTO_BASE}/watch/{slug}")
    }

    /// Pick the catalog entry whose title matches, ignoring case.
    fn best_match<'a>(hits: &'a [SearchHit], title: &str) -> Option<&'a SearchHit> {
        let wanted = title.to_lowercase();
        hits.iter()
            .find(|hit| hit.title.to_lowercase() == wanted)
            .or_else(|| hits.first())
    }

    fn extract_embeds(html: &str) -> Vec<String> {
        EMBED_RE
            .captures_iter(html)
            .map(|caps| caps[1].to_string())
            .collect()
    }
}

#[async_trait]
impl SourceProvider for AzmTo {
    fn name(&self) -> &'static str {
        "azmto"
    }

    fn applies_to(&self, request: &MediaRequest) -> bool {
        request.is_movie()
    }

    fn requires_title(&self) -> bool {
        true
    }

    async fn fetch(&self, cx: &FetchContext) -> Result<SourceResult> {
        let title = cx
            .title
            .as_deref()
            .ok_or_else(|| anyhow!("no resolved title in context"))?;

        let resp = self
            .client
            .get(&Self::search_url(title))
            .header("X-Forwarded-For", &cx.request.client_ip)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(anyhow!("AZM search returned {}", resp.status()));
        }

        let search: SearchResults = resp.json().await?;
        let hit = Self::best_match(&search.results, title)
            .ok_or_else(|| anyhow!("no catalog entry for '{title}'"))?;

        let html = self
            .client
            .get(&Self::watch_url(&hit.slug))
            .header("X-Forwarded-For", &cx.request.client_ip)
            .send()
            .await?
            .text()
            .await?;

        let streams = Self::extract_embeds(&html)
            .into_iter()
            .map(|url| Stream {
                url,
                quality: None,
                language: None,
                server: Some("azmto".to_string()),
            })
            .collect();

        Ok(SourceResult::new(self.name(), streams))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_is_percent_encoded() {
        assert_eq!(
            AzmTo::search_url("Fight Club"),
            "https://azm.to/api/search?q=Fight%20Club"
        );
    }

    #[test]
    fn best_match_prefers_exact_title() {
        let hits = vec![
            SearchHit {
                title: "Fight Club 2".to_string(),
                slug: "fight-club-2".to_string(),
            },
            SearchHit {
                title: "fight club".to_string(),
                slug: "fight-club".to_string(),
            },
        ];

        let hit = AzmTo::best_match(&hits, "Fight Club").unwrap();
        assert_eq!(hit.slug, "fight-club");
    }

    #[test]
    fn best_match_falls_back_to_first_hit() {
        let hits = vec![SearchHit {
            title: "Fight Club (1999)".to_string(),
            slug: "fight-club-1999".to_string(),
        }];
        assert_eq!(AzmTo::best_match(&hits, "Fight Club").unwrap().slug, "fight-club-1999");
        assert!(AzmTo::best_match(&[], "Fight Club").is_none());
    }

    #[test]
    fn extracts_embed_attributes() {
        let html = r#"
            <div class="server" data-embed="https://voe.sx/e/abc123"></div>
            <div class="server" data-embed='https://mirror.example/e/def'></div>
        "#;
        assert_eq!(
            AzmTo::extract_embeds(html),
            vec!["https://voe.sx/e/abc123", "https://mirror.example/e/def"]
        );
    }

    #[test]
    fn movie_only_and_title_gated() {
        let provider = AzmTo::new(ScraperClient::new().unwrap());
        assert!(provider.applies_to(&MediaRequest::movie("550", "0.0.0.0")));
        assert!(!provider.applies_to(&MediaRequest::episode("1396", 1, 1, "0.0.0.0")));
        assert!(provider.requires_title());
    }
}
