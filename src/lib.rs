//! `streamscout` - playable-source aggregation for movies and TV episodes
//!
//! # Features
//!
//! - **Concurrent aggregation**: every eligible provider is scraped in
//!   parallel under one batch deadline; a broken provider never blocks the rest
//! - **Provider adapters**: each third-party streaming site lives behind the
//!   uniform [`SourceProvider`] trait
//! - **Best-effort subtitles**: caption tracks are fetched independently and
//!   never gate a successful response
//!
//! # Example
//!
//! ```rust,no_run
//! use streamscout::config::ScoutConfig;
//! use streamscout::http_client::ScraperClient;
//! use streamscout::scrape::{engine, merge, MediaRequest, ProviderRegistry};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ScoutConfig::from_env();
//!     let client = ScraperClient::new()?;
//!     let registry = ProviderRegistry::standard(&config, client);
//!
//!     let request = MediaRequest::movie("550", "203.0.113.7");
//!     let selection = registry.select(&request).await;
//!     let aggregate = engine::run(selection, config.deadline).await;
//!     let response = merge::merge(aggregate, vec![]);
//!     println!("{}", serde_json::to_string_pretty(&response)?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod http_client;
pub mod metadata;
pub mod scrape;
pub mod subtitles;

pub use config::ScoutConfig;
pub use http_client::ScraperClient;
pub use metadata::{TitleCatalog, TmdbCatalog};
pub use scrape::engine::{AggregateResult, FailureReason, Outcome};
pub use scrape::merge::SourceResponse;
pub use scrape::provider::{FetchContext, SourceProvider, SourceResult, Stream};
pub use scrape::request::{EpisodeRef, MediaRequest};
pub use scrape::{ProviderRegistry, ScrapeError, Selection};
pub use subtitles::{Caption, SubtitleClient};

/// Version of streamscout
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
