//! Lyrics-id resolution stage.
//!
//! Walks a normalized track sequence in order and tries to resolve each
//! track to a lyrics-database id via fuzzy search. Resolution is best
//! effort per track: a bounded retry budget, a fixed pause after every
//! attempt, and a longer cooldown whenever the service pushes back with
//! a rate limit. Tracks that cannot be resolved pass through unchanged.

pub mod genius;
pub mod resilience;

use std::time::Duration;

use async_trait::async_trait;

use refrain_core::model::Track;

use crate::error::EnrichResult;
use crate::lyrics::resilience::Throttle;

/// Default pause between search attempts, in milliseconds.
pub const DEFAULT_SEARCH_DELAY_MS: u64 = 500;

/// Default number of search attempts per track.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

// ---------------------------------------------------------------------------
// Collaborator interface
// ---------------------------------------------------------------------------

/// Narrow interface onto a lyrics-database search service.
#[async_trait]
pub trait LyricsSearch {
    /// Search for a song by title and artist.
    ///
    /// Returns the best candidate the service offers, or `None` when
    /// the search comes back empty. Implementations work from search
    /// hits alone and never fetch full song records.
    async fn search_song(&self, title: &str, artist: &str) -> EnrichResult<Option<SongMatch>>;
}

/// A candidate song returned by the search collaborator.
#[derive(Debug, Clone)]
pub struct SongMatch {
    /// Lyrics-database identifier.
    pub id: u64,
    /// Candidate title.
    pub title: String,
    /// Primary-artist credit, e.g. "Beyoncé & JAY-Z".
    pub artist: String,
}

/// Tunables for [`resolve_ids`].
#[derive(Debug, Clone)]
pub struct MatchOptions {
    /// Pause inserted after every search attempt.
    pub delay: Duration,
    /// Search attempts allowed per track.
    pub max_retries: u32,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(DEFAULT_SEARCH_DELAY_MS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// Accept a candidate only when one artist name contains the other,
/// case-insensitively.
///
/// Containment in either direction tolerates collaboration credits
/// ("JAY-Z" matches "Beyoncé & JAY-Z") without accepting unrelated
/// artists. Deliberately no fuzzier than that.
#[must_use]
pub fn is_good_match(candidate_artist: &str, first_artist: &str) -> bool {
    let candidate = candidate_artist.to_lowercase();
    let target = first_artist.to_lowercase();
    candidate.contains(&target) || target.contains(&candidate)
}

/// Resolve lyrics ids for every track, in order.
///
/// Each track gets up to `options.max_retries` search attempts. An
/// attempt that errors, returns nothing, or returns a candidate whose
/// artist fails [`is_good_match`] consumes one retry; every attempt,
/// including an accepting one, is followed by `options.delay`. A
/// rate-limited attempt additionally waits out the cooldown before the
/// standard delay.
///
/// The returned sequence has the same length and order as the input.
/// Tracks whose search never produced an accepted candidate come back
/// unchanged.
pub async fn resolve_ids<S>(tracks: Vec<Track>, search: &S, options: &MatchOptions) -> Vec<Track>
where
    S: LyricsSearch + ?Sized,
{
    let throttle = Throttle::new(options.delay);
    let total = tracks.len();
    let mut resolved = Vec::with_capacity(total);

    for track in tracks {
        let lyrics_id = resolve_one(&track, search, options, &throttle).await;
        resolved.push(match lyrics_id {
            Some(id) => track.with_lyrics_id(id),
            None => track,
        });
    }

    let matched = resolved.iter().filter(|t| t.is_resolved()).count();
    log::info!("Resolved lyrics ids for {} of {} tracks", matched, total);

    resolved
}

async fn resolve_one<S>(
    track: &Track,
    search: &S,
    options: &MatchOptions,
    throttle: &Throttle,
) -> Option<String>
where
    S: LyricsSearch + ?Sized,
{
    let mut lyrics_id = None;
    let mut attempt = 0;

    while attempt < options.max_retries && lyrics_id.is_none() {
        match search.search_song(&track.track_name, &track.first_artist).await {
            Ok(Some(song)) => {
                if is_good_match(&song.artist, &track.first_artist) {
                    log::debug!(
                        "Accepted '{}' (id {}) for '{}'",
                        song.title,
                        song.id,
                        track.track_name
                    );
                    lyrics_id = Some(song.id.to_string());
                } else {
                    log::debug!(
                        "Rejected '{}' by '{}' for '{}': artist mismatch",
                        song.title,
                        song.artist,
                        track.track_name
                    );
                }
            }
            Ok(None) => {
                log::debug!("No search result for '{}'", track.track_name);
            }
            Err(e) => {
                log::warn!("Search failed for '{}': {}", track.track_name, e);
                if e.is_rate_limited() {
                    throttle.rate_limit_cooldown().await;
                }
            }
        }

        // Every attempt consumes a retry and pays the pause, accepted
        // or not.
        attempt += 1;
        throttle.pause().await;
    }

    lyrics_id
}
