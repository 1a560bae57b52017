//! Spotify catalog client.
//!
//! Implements [`CatalogSource`] against the Spotify Web API using the
//! client-credentials grant, which grants access to public catalog data
//! without any user login. A token obtained at connect time lives for
//! an hour, comfortably longer than any capped fetch.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::catalog::{CatalogSource, RawTrack, TrackPage};
use crate::error::{EnrichError, EnrichResult};

const ACCOUNTS_URL: &str = "https://accounts.spotify.com/api/token";
const API_BASE: &str = "https://api.spotify.com/v1";

/// Page size requested from the listing endpoints (the service maximum).
const PAGE_LIMIT: usize = 100;

const SOURCE: &str = "Spotify";

// ---------------------------------------------------------------------------
// API response types (private -- Spotify wraps listings in a paging object)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Spotify's standard paging envelope.
///
/// Album listings put track objects directly in `items`; playlist
/// listings wrap each one in a [`PlaylistEntry`] whose `track` may be
/// null for removed or unavailable entries.
#[derive(Debug, Deserialize)]
struct Paging<T> {
    items: Vec<T>,
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaylistEntry {
    track: Option<RawTrack>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Spotify Web API client.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    access_token: String,
}

impl SpotifyClient {
    /// Connect to the Spotify API with the client-credentials grant.
    ///
    /// Register an application at
    /// <https://developer.spotify.com/dashboard> to obtain the id and
    /// secret.
    ///
    /// # Errors
    ///
    /// Returns [`EnrichError::Auth`] when the service rejects the
    /// credentials, or a transport or parse error when the token
    /// request itself fails.
    pub async fn connect(client_id: &str, client_secret: &str) -> EnrichResult<Self> {
        let http = Client::builder()
            .user_agent("refrain/0.1.0 (https://github.com/oxur/refrain)")
            .timeout(Duration::from_secs(30))
            .build()?;

        let credentials = base64::Engine::encode(
            &base64::engine::general_purpose::STANDARD,
            format!("{client_id}:{client_secret}"),
        );

        let response = http
            .post(ACCOUNTS_URL)
            .header("Authorization", format!("Basic {credentials}"))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST
            || status == StatusCode::UNAUTHORIZED
            || status == StatusCode::FORBIDDEN
        {
            return Err(EnrichError::Auth {
                source_name: SOURCE.to_string(),
                message: format!("token request rejected with {status}"),
            });
        }
        if !status.is_success() {
            return Err(EnrichError::Http {
                source_name: SOURCE.to_string(),
                message: format!("token request failed with {status}"),
            });
        }

        let token: TokenResponse = response.json().await.map_err(|e| EnrichError::Parse {
            source_name: SOURCE.to_string(),
            message: e.to_string(),
        })?;

        log::debug!("Obtained Spotify client-credentials token");

        Ok(Self {
            http,
            access_token: token.access_token,
        })
    }

    /// Fetch one page of a listing endpoint.
    async fn list<T>(&self, url: &str, offset: usize) -> EnrichResult<Paging<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("limit", PAGE_LIMIT.to_string()),
                ("offset", offset.to_string()),
            ])
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
                message: format!("listing rejected with {status}"),
            });
        }
        if status == StatusCode::NOT_FOUND {
            return Err(EnrichError::NotFound {
                entity: url.to_string(),
                source_name: SOURCE.to_string(),
            });
        }
        if !status.is_success() {
            return Err(EnrichError::Http {
                source_name: SOURCE.to_string(),
                message: format!("listing failed with {status}"),
            });
        }

        response.json().await.map_err(|e| EnrichError::Parse {
            source_name: SOURCE.to_string(),
            message: e.to_string(),
        })
    }
}

fn album_page(page: Paging<RawTrack>, offset: usize) -> TrackPage {
    let next_offset = page.next.is_some().then(|| offset + page.items.len());
    TrackPage {
        entries: page.items.into_iter().map(Some).collect(),
        next_offset,
    }
}

fn playlist_page(page: Paging<PlaylistEntry>, offset: usize) -> TrackPage {
    let next_offset = page.next.is_some().then(|| offset + page.items.len());
    TrackPage {
        entries: page.items.into_iter().map(|entry| entry.track).collect(),
        next_offset,
    }
}

#[async_trait]
impl CatalogSource for SpotifyClient {
    async fn album_tracks(&self, album_id: &str, offset: usize) -> EnrichResult<TrackPage> {
        let url = format!("{API_BASE}/albums/{album_id}/tracks");
        let page = self.list(&url, offset).await?;
        Ok(album_page(page, offset))
    }

    async fn playlist_tracks(&self, playlist_id: &str, offset: usize) -> EnrichResult<TrackPage> {
        let url = format!("{API_BASE}/playlists/{playlist_id}/tracks");
        let page = self.list(&url, offset).await?;
        Ok(playlist_page(page, offset))
    }
}
