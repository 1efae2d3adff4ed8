//! Source provider trait and common types.
//!
//! A [`SourceProvider`] knows how to extract playable stream URLs for a movie
//! or episode from one specific third-party site. The aggregation engine
//! treats every provider identically through this trait; it never
//! special-cases a provider by name.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::scrape::request::MediaRequest;

/// One playable stream extracted by a provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stream {
    /// Direct or embed URL of the stream (HLS manifest, MP4, embed page).
    pub url: String,
    /// Quality label if known (e.g., `"1080p"`, `"auto"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    /// Audio language if known (ISO 639-1).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Server/mirror label shown to the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
}

impl Stream {
    /// A stream with only a URL; metadata fields default to `None`.
    #[must_use]
    pub fn bare(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            quality: None,
            language: None,
            server: None,
        }
    }
}

/// Everything one provider returned for one request.
///
/// The engine does not inspect the stream list beyond checking that it is
/// non-empty; the payload shape belongs to the provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceResult {
    /// Name of the provider that produced these streams.
    pub provider: String,
    /// Playable streams, in provider order.
    pub streams: Vec<Stream>,
}

impl SourceResult {
    #[must_use]
    pub fn new(provider: impl Into<String>, streams: Vec<Stream>) -> Self {
        Self {
            provider: provider.into(),
            streams,
        }
    }
}

/// The request plus prerequisite data bound by the selector before dispatch.
///
/// Read-only during the fan-out; every provider task sees the same context.
#[derive(Debug, Clone)]
pub struct FetchContext {
    pub request: MediaRequest,
    /// Human-readable title, resolved only when an eligible provider needs it.
    pub title: Option<String>,
}

impl FetchContext {
    #[must_use]
    pub fn new(request: MediaRequest) -> Self {
        Self {
            request,
            title: None,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Trait for third-party source providers.
///
/// Implementations hold only immutable configuration (API keys, base hosts,
/// a shared HTTP client) and must not retain request-scoped state between
/// calls, so one instance serves concurrent requests safely.
#[async_trait]
pub trait SourceProvider: Send + Sync {
    /// Short lowercase provider name (e.g., `"vidsrc"`, `"filecdn"`).
    fn name(&self) -> &'static str;

    /// Returns `true` if this provider can serve the given request shape.
    fn applies_to(&self, request: &MediaRequest) -> bool;

    /// Whether this provider needs a resolved title instead of the raw id.
    ///
    /// The selector resolves the title before dispatch and excludes the
    /// provider when the lookup fails.
    fn requires_title(&self) -> bool {
        false
    }

    /// Scrape playable streams for the request.
    ///
    /// Errors, panics, and overruns of the batch deadline are all contained
    /// by the engine; they never affect sibling providers.
    async fn fetch(&self, cx: &FetchContext) -> Result<SourceResult>;
}
