//! The aggregation engine: concurrent provider fan-out with failure isolation.
//!
//! Every selected provider runs as its own tokio task under one shared batch
//! deadline. A provider error, panic, or overrun becomes a [`Failure`]
//! outcome local to that provider; it never cancels or delays a sibling. The
//! engine waits for every dispatched invocation to reach a terminal state
//! before returning, so callers observe one synchronization barrier per
//! request and nothing else.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::scrape::provider::SourceResult;
use crate::scrape::registry::Selection;

/// Why one provider invocation produced no sources.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureReason {
    /// The provider returned an error or an empty stream list.
    #[error("provider error: {0}")]
    Provider(String),
    /// The invocation was still unresolved when the batch deadline elapsed.
    #[error("batch deadline exceeded")]
    Timeout,
    /// The provider task panicked.
    #[error("provider task panicked")]
    Panicked,
}

/// Terminal state of one provider invocation. Exactly one per dispatch.
#[derive(Debug)]
pub enum Outcome {
    Success(SourceResult),
    Failure {
        provider: &'static str,
        reason: FailureReason,
    },
}

impl Outcome {
    fn failure(provider: &'static str, reason: FailureReason) -> Self {
        Self::Failure { provider, reason }
    }
}

/// Record of one failed invocation, kept for observability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    pub provider: &'static str,
    pub reason: FailureReason,
}

/// Successful results collected within the deadline, plus failure records.
///
/// `attempted == 0` means the selector produced no providers, which is
/// distinguishable from "every attempted provider failed".
#[derive(Debug, Default)]
pub struct AggregateResult {
    pub sources: Vec<SourceResult>,
    pub failures: Vec<SourceFailure>,
    pub attempted: usize,
}

impl AggregateResult {
    /// `true` when no provider produced a source.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Run every selected provider concurrently and collect the survivors.
///
/// Each invocation is spawned as its own task and raced against `deadline`;
/// a timed-out task is aborted (best-effort) and recorded as
/// [`FailureReason::Timeout`]. Collection order of successes is
/// unspecified. Never returns an error: the worst case is an empty result.
pub async fn run(selection: Selection, deadline: Duration) -> AggregateResult {
    let attempted = selection.providers.len();
    if attempted == 0 {
        debug!("no providers selected, skipping dispatch");
        return AggregateResult::default();
    }

    let cx = Arc::new(selection.context);
    let batch_start = Instant::now();

    // Spawn first so every provider starts immediately; the timeout wrapper
    // then only bounds how long we wait for each handle.
    let waits = selection.providers.into_iter().map(|provider| {
        let cx = Arc::clone(&cx);
        let name = provider.name();
        let mut handle = tokio::spawn(async move { provider.fetch(&cx).await });

        async move {
            let started = Instant::now();
            let outcome = match timeout(deadline, &mut handle).await {
                Ok(Ok(Ok(result))) if result.streams.is_empty() => Outcome::failure(
                    name,
                    FailureReason::Provider("returned no streams".to_string()),
                ),
                Ok(Ok(Ok(result))) => Outcome::Success(result),
                Ok(Ok(Err(e))) => Outcome::failure(name, FailureReason::Provider(e.to_string())),
                Ok(Err(_)) => Outcome::failure(name, FailureReason::Panicked),
                Err(_) => {
                    handle.abort();
                    Outcome::failure(name, FailureReason::Timeout)
                }
            };

            let elapsed_ms = started.elapsed().as_millis() as u64;
            match &outcome {
                Outcome::Success(result) => {
                    debug!(
                        provider = name,
                        streams = result.streams.len(),
                        elapsed_ms,
                        "provider succeeded"
                    );
                }
                Outcome::Failure { reason, .. } => {
                    warn!(provider = name, elapsed_ms, %reason, "provider failed");
                }
            }
            outcome
        }
    });

    let mut aggregate = AggregateResult {
        attempted,
        ..AggregateResult::default()
    };
    for outcome in join_all(waits).await {
        match outcome {
            Outcome::Success(result) => aggregate.sources.push(result),
            Outcome::Failure { provider, reason } => {
                aggregate.failures.push(SourceFailure { provider, reason });
            }
        }
    }

    info!(
        succeeded = aggregate.sources.len(),
        attempted,
        elapsed_ms = batch_start.elapsed().as_millis() as u64,
        "scrape batch finished"
    );

    aggregate
}
