//! Provider registry and per-request selection.
//!
//! The registry is built once at process start and read concurrently by every
//! request afterwards. Selection applies each provider's eligibility
//! predicate to the request shape and binds prerequisite data (the resolved
//! title) into the dispatch context. Selection never fails outright; a
//! provider whose prerequisite cannot be obtained is dropped with a warning.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::ScoutConfig;
use crate::http_client::ScraperClient;
use crate::metadata::{TitleCatalog, TmdbCatalog};
use crate::scrape::provider::{FetchContext, SourceProvider};
use crate::scrape::providers::{
    AzmTo, DreamFilm, FileCdn, FrEmbed, MeineCloud, TwoEmbed, VidSrc,
};
use crate::scrape::request::MediaRequest;
use crate::scrape::ScrapeError;

/// The provider set and dispatch context for one request.
pub struct Selection {
    pub providers: Vec<Arc<dyn SourceProvider>>,
    pub context: FetchContext,
}

impl Selection {
    /// Names of the selected providers, in registration order.
    #[must_use]
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }
}

/// Fixed, process-wide set of known providers plus the title catalog.
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn SourceProvider>>,
    catalog: Arc<dyn TitleCatalog>,
}

impl ProviderRegistry {
    /// Build a registry from an explicit provider list and catalog.
    #[must_use]
    pub fn new(providers: Vec<Arc<dyn SourceProvider>>, catalog: Arc<dyn TitleCatalog>) -> Self {
        Self { providers, catalog }
    }

    /// The standard registry with every known provider.
    #[must_use]
    pub fn standard(config: &ScoutConfig, client: ScraperClient) -> Self {
        let catalog = Arc::new(TmdbCatalog::new(client.clone(), &config.tmdb_api_key));

        let providers: Vec<Arc<dyn SourceProvider>> = vec![
            Arc::new(VidSrc::new(client.clone())),
            Arc::new(DreamFilm::new(client.clone())),
            Arc::new(FileCdn::new(client.clone())),
            Arc::new(FrEmbed::new(client.clone())),
            Arc::new(TwoEmbed::new(client.clone())),
            Arc::new(MeineCloud::new(client.clone(), &config.tmdb_api_key)),
            Arc::new(AzmTo::new(client)),
        ];

        Self { providers, catalog }
    }

    /// Registered provider descriptors as `(name, movie, episode)` tuples.
    #[must_use]
    pub fn describe(&self) -> Vec<(&'static str, bool, bool)> {
        let movie = MediaRequest::movie("0", "0.0.0.0");
        let episode = MediaRequest::episode("0", 1, 1, "0.0.0.0");
        self.providers
            .iter()
            .map(|p| (p.name(), p.applies_to(&movie), p.applies_to(&episode)))
            .collect()
    }

    /// Select the providers eligible for `request` and bind their context.
    ///
    /// Resolves the title once when any eligible provider requires it; if the
    /// lookup fails, only the title-requiring providers are excluded and the
    /// rest of the selection proceeds untouched.
    pub async fn select(&self, request: &MediaRequest) -> Selection {
        let eligible: Vec<Arc<dyn SourceProvider>> = self
            .providers
            .iter()
            .filter(|p| p.applies_to(request))
            .cloned()
            .collect();

        let mut context = FetchContext::new(request.clone());
        let mut title_available = false;

        if eligible.iter().any(|p| p.requires_title()) {
            match self.catalog.resolve_title(&request.media_id).await {
                Ok(title) => {
                    context = context.with_title(title);
                    title_available = true;
                }
                Err(e) => {
                    for p in eligible.iter().filter(|p| p.requires_title()) {
                        let excluded = ScrapeError::PrerequisiteUnavailable {
                            provider: p.name(),
                            message: e.to_string(),
                        };
                        warn!(provider = p.name(), "{excluded}");
                    }
                }
            }
        }

        let providers: Vec<Arc<dyn SourceProvider>> = eligible
            .into_iter()
            .filter(|p| title_available || !p.requires_title())
            .collect();

        debug!(
            media_id = %request.media_id,
            mode = if request.is_movie() { "movie" } else { "episode" },
            selected = providers.len(),
            "provider selection complete"
        );

        Selection { providers, context }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;

    struct FixedCatalog {
        title: Option<&'static str>,
    }

    #[async_trait]
    impl TitleCatalog for FixedCatalog {
        async fn resolve_title(&self, _media_id: &str) -> anyhow::Result<String> {
            self.title
                .map(str::to_string)
                .ok_or_else(|| anyhow!("catalog unavailable"))
        }
    }

    fn registry(title: Option<&'static str>) -> ProviderRegistry {
        let client = ScraperClient::new().unwrap();
        let config = ScoutConfig::default();
        let standard = ProviderRegistry::standard(&config, client);
        ProviderRegistry::new(standard.providers, Arc::new(FixedCatalog { title }))
    }

    #[tokio::test]
    async fn movie_mode_selects_all_movie_providers() {
        let registry = registry(Some("Fight Club"));
        let request = MediaRequest::movie("550", "203.0.113.7");

        let selection = registry.select(&request).await;
        assert_eq!(
            selection.provider_names(),
            vec![
                "vidsrc",
                "dreamfilm",
                "filecdn",
                "frembed",
                "twoembed",
                "meinecloud",
                "azmto"
            ]
        );
        assert_eq!(selection.context.title.as_deref(), Some("Fight Club"));
    }

    #[tokio::test]
    async fn episode_mode_excludes_movie_only_providers() {
        let registry = registry(Some("Breaking Bad"));
        let request = MediaRequest::episode("1396", 1, 1, "203.0.113.7");

        let selection = registry.select(&request).await;
        assert_eq!(
            selection.provider_names(),
            vec!["vidsrc", "dreamfilm", "filecdn"]
        );
        // No episode-mode provider needs the title, so no lookup happened.
        assert_eq!(selection.context.title, None);
    }

    #[tokio::test]
    async fn failed_title_lookup_excludes_only_title_provider() {
        let registry = registry(None);
        let request = MediaRequest::movie("550", "203.0.113.7");

        let selection = registry.select(&request).await;
        let names = selection.provider_names();
        assert!(!names.contains(&"azmto"));
        assert_eq!(names.len(), 6);
        assert_eq!(selection.context.title, None);
    }

    #[tokio::test]
    async fn selection_never_fails_on_empty_registry() {
        let registry =
            ProviderRegistry::new(vec![], Arc::new(FixedCatalog { title: None }));
        let request = MediaRequest::movie("550", "203.0.113.7");

        let selection = registry.select(&request).await;
        assert!(selection.providers.is_empty());
    }
}
