//! Source aggregation: selection, concurrent fan-out, and merge.
//!
//! Control flow for one request:
//! [`ProviderRegistry::select`] builds the eligible provider set →
//! [`engine::run`] scrapes them concurrently under one batch deadline →
//! [`merge::merge`] combines the successes with the subtitle collection.

pub mod embeds;
pub mod engine;
pub mod merge;
pub mod provider;
pub mod providers;
pub mod registry;
pub mod request;

pub use engine::{AggregateResult, FailureReason, Outcome};
pub use merge::SourceResponse;
pub use provider::{FetchContext, SourceProvider, SourceResult, Stream};
pub use registry::{ProviderRegistry, Selection};
pub use request::{EpisodeRef, MediaRequest};

use thiserror::Error;

/// Errors the aggregation subsystem can surface.
///
/// `PrerequisiteUnavailable` is handled entirely inside the selector (the
/// affected provider is excluded); only `EmptyAggregate` ever reaches the
/// calling boundary. The worst-case outcome of this subsystem is "return
/// nothing", never a crashed request.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Every eligible provider failed, or none were eligible.
    #[error("no playable sources were found")]
    EmptyAggregate,

    /// A provider's prerequisite lookup failed; the provider is skipped.
    #[error("prerequisite lookup failed for provider {provider}: {message}")]
    PrerequisiteUnavailable {
        provider: &'static str,
        message: String,
    },
}
