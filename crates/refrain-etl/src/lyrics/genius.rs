//! Genius search client.
//!
//! Implements [`LyricsSearch`] against the Genius `/search` endpoint.
//! Search hits already carry the song id and primary-artist credit the
//! matcher needs, so no follow-up song lookup is ever made.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::error::{EnrichError, EnrichResult};
use crate::lyrics::{LyricsSearch, SongMatch};

const GENIUS_API_BASE: &str = "https://api.genius.com";

const SOURCE: &str = "Genius";

// ---------------------------------------------------------------------------
// API response types (private -- Genius nests hits two levels deep)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchResponse {
    response: SearchBody,
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    #[serde(default)]
    hits: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "type")]
    hit_type: String,
    result: HitResult,
}

#[derive(Debug, Deserialize)]
struct HitResult {
    id: u64,
    title: String,
    primary_artist: HitArtist,
}

#[derive(Debug, Deserialize)]
struct HitArtist {
    name: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Genius API client.
#[derive(Debug, Clone)]
pub struct GeniusClient {
    http: Client,
    access_token: String,
}

impl GeniusClient {
    /// Create a new Genius API client.
    ///
    /// The `access_token` must be a client access token generated at
    /// <https://genius.com/api-clients>.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(access_token: String) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent("refrain/0.1.0 (https://github.com/oxur/refrain)")
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { http, access_token })
    }
}

/// Pick the first hit that is actually a song.
///
/// Search results interleave songs with albums, articles, and other
/// page types.
fn first_song_hit(response: SearchResponse) -> Option<SongMatch> {
    response
        .response
        .hits
        .into_iter()
        .find(|hit| hit.hit_type == "song")
        .map(|hit| SongMatch {
            id: hit.result.id,
            title: hit.result.title,
            artist: hit.result.primary_artist.name,
        })
}

#[async_trait]
impl LyricsSearch for GeniusClient {
    async fn search_song(&self, title: &str, artist: &str) -> EnrichResult<Option<SongMatch>> {
        let query = format!("{title} {artist}");

        let response = self
            .http
            .get(format!("{GENIUS_API_BASE}/search"))
            .bearer_auth(&self.access_token)
            .query(&[("q", query.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(EnrichError::RateLimited {
                source_name: SOURCE.to_string(),
            });
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(EnrichError::Auth {
                source_name: SOURCE.to_string(),
                message: format!("search rejected with {status}"),
            });
        }
        if !status.is_success() {
            return Err(EnrichError::Http {
                source_name: SOURCE.to_string(),
                message: format!("search failed with {status}"),
            });
        }

        let body: SearchResponse = response.json().await.map_err(|e| EnrichError::Parse {
            source_name: SOURCE.to_string(),
            message: e.to_string(),
        })?;

        Ok(first_song_hit(body))
    }
}
