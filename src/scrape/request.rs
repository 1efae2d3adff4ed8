//! Request model: one media item to find sources for.

use serde::{Deserialize, Serialize};

/// Season/episode coordinates within a TV series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRef {
    pub season: u32,
    pub episode: u32,
}

/// One inbound request for playable sources.
///
/// `episode` present means episode mode, absent means movie mode. The two
/// shapes are mutually exclusive and decide provider eligibility. Immutable
/// once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRequest {
    /// TMDB id of the movie or series.
    pub media_id: String,
    /// Set only for episode-mode requests.
    pub episode: Option<EpisodeRef>,
    /// Originating client address, forwarded to providers that key on it.
    pub client_ip: String,
}

impl MediaRequest {
    /// Build a movie-mode request.
    #[must_use]
    pub fn movie(media_id: impl Into<String>, client_ip: impl Into<String>) -> Self {
        Self {
            media_id: media_id.into(),
            episode: None,
            client_ip: client_ip.into(),
        }
    }

    /// Build an episode-mode request.
    #[must_use]
    pub fn episode(
        media_id: impl Into<String>,
        season: u32,
        episode: u32,
        client_ip: impl Into<String>,
    ) -> Self {
        Self {
            media_id: media_id.into(),
            episode: Some(EpisodeRef { season, episode }),
            client_ip: client_ip.into(),
        }
    }

    /// `true` for movie-mode requests.
    #[must_use]
    pub fn is_movie(&self) -> bool {
        self.episode.is_none()
    }

    /// `true` for episode-mode requests.
    #[must_use]
    pub fn is_episode(&self) -> bool {
        self.episode.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_and_episode_modes_are_exclusive() {
        let movie = MediaRequest::movie("550", "203.0.113.7");
        assert!(movie.is_movie());
        assert!(!movie.is_episode());

        let episode = MediaRequest::episode("1396", 1, 1, "203.0.113.7");
        assert!(episode.is_episode());
        assert!(!episode.is_movie());
        assert_eq!(episode.episode, Some(EpisodeRef { season: 1, episode: 1 }));
    }
}
