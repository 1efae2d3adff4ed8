//! Runtime configuration, overridable from the environment.

use std::time::Duration;

/// TMDB API key shipped with the service; override with `STREAMSCOUT_TMDB_KEY`.
const DEFAULT_TMDB_KEY: &str = "f1dd7f2494de60ef4946ea81fd5ebaba";

/// Default batch deadline for one scrape fan-out.
const DEFAULT_DEADLINE_SECS: u64 = 15;

/// Default subtitle search endpoint.
const DEFAULT_SUBTITLE_API: &str = "https://sub.wyzie.ru";

/// Process-wide configuration, built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct ScoutConfig {
    /// API key for the TMDB catalog (title resolution).
    pub tmdb_api_key: String,
    /// Deadline for one whole provider fan-out batch.
    pub deadline: Duration,
    /// Base URL of the subtitle search API.
    pub subtitle_api_base: String,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            tmdb_api_key: DEFAULT_TMDB_KEY.to_string(),
            deadline: Duration::from_secs(DEFAULT_DEADLINE_SECS),
            subtitle_api_base: DEFAULT_SUBTITLE_API.to_string(),
        }
    }
}

impl ScoutConfig {
    /// Build a config from defaults plus environment overrides.
    ///
    /// Recognized variables: `STREAMSCOUT_TMDB_KEY`,
    /// `STREAMSCOUT_DEADLINE_SECS`, `STREAMSCOUT_SUBTITLE_API`.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(key) = std::env::var("STREAMSCOUT_TMDB_KEY") {
            if !key.is_empty() {
                config.tmdb_api_key = key;
            }
        }

        if let Ok(secs) = std::env::var("STREAMSCOUT_DEADLINE_SECS") {
            if let Ok(secs) = secs.parse::<u64>() {
                config.deadline = Duration::from_secs(secs);
            }
        }

        if let Ok(base) = std::env::var("STREAMSCOUT_SUBTITLE_API") {
            if !base.is_empty() {
                config.subtitle_api_base = base.trim_end_matches('/').to_string();
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sane_values() {
        let config = ScoutConfig::default();
        assert!(!config.tmdb_api_key.is_empty());
        assert_eq!(config.deadline, Duration::from_secs(15));
        assert!(config.subtitle_api_base.starts_with("https://"));
    }
}
