//! Merge of aggregated sources with the subtitle collection.

use serde::{Deserialize, Serialize};

use crate::scrape::engine::AggregateResult;
use crate::scrape::provider::SourceResult;
use crate::subtitles::Caption;

/// The final response payload for one request.
///
/// Subtitles are best-effort: a non-empty `sources` list is a success even
/// when `captions` is empty. The calling boundary decides how an empty
/// `sources` list is reported.
#[derive(Debug, Serialize, Deserialize)]
pub struct SourceResponse {
    pub sources: Vec<SourceResult>,
    pub captions: Vec<Caption>,
}

/// Combine the engine's successes with the subtitle collection.
///
/// Pure; either input may legitimately be empty.
#[must_use]
pub fn merge(aggregate: AggregateResult, captions: Vec<Caption>) -> SourceResponse {
    SourceResponse {
        sources: aggregate.sources,
        captions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::provider::Stream;

    #[test]
    fn empty_captions_do_not_gate_sources() {
        let aggregate = AggregateResult {
            sources: vec![SourceResult::new(
                "vidsrc",
                vec![Stream::bare("https://cdn.example/a.m3u8")],
            )],
            failures: vec![],
            attempted: 1,
        };

        let response = merge(aggregate, vec![]);
        assert_eq!(response.sources.len(), 1);
        assert!(response.captions.is_empty());
    }

    #[test]
    fn both_inputs_may_be_empty() {
        let response = merge(AggregateResult::default(), vec![]);
        assert!(response.sources.is_empty());
        assert!(response.captions.is_empty());
    }

    #[test]
    fn serializes_to_the_expected_shape() {
        let aggregate = AggregateResult {
            sources: vec![SourceResult::new(
                "filecdn",
                vec![Stream::bare("https://cdn.example/b.mp4")],
            )],
            failures: vec![],
            attempted: 1,
        };
        let captions = vec![Caption {
            url: "https://subs.example/550.vtt".to_string(),
            language: "en".to_string(),
            label: "English".to_string(),
        }];

        let json = serde_json::to_value(merge(aggregate, captions)).unwrap();
        assert!(json.get("sources").is_some());
        assert!(json.get("captions").is_some());
        assert_eq!(json["sources"][0]["provider"], "filecdn");
        assert_eq!(json["captions"][0]["language"], "en");
    }
}
