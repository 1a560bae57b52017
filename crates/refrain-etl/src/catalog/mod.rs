//! Catalog retrieval stage.
//!
//! Pages through an album's or playlist's track listing and normalizes
//! the raw entries into canonical [`Track`] records. Retrieval is
//! all-or-nothing per entity: a listing error discards any partial page
//! data so callers never mistake a half-fetched playlist for a complete
//! one.

pub mod spotify;

use async_trait::async_trait;
use serde::Deserialize;

use refrain_core::model::{EntityKind, EntityRef, Track};

use crate::error::{EnrichError, EnrichResult};

/// Hard cap on pages consumed per listing.
///
/// At the service's 100-entry page size this bounds a fetch to roughly
/// 2000 tracks.
pub const MAX_PAGES: usize = 20;

// ---------------------------------------------------------------------------
// Collaborator interface
// ---------------------------------------------------------------------------

/// Narrow interface onto a streaming-catalog service.
///
/// Implementations return one page per call; [`fetch_tracks`] drives the
/// pagination loop.
#[async_trait]
pub trait CatalogSource {
    /// List one page of an album's tracks starting at `offset`.
    async fn album_tracks(&self, album_id: &str, offset: usize) -> EnrichResult<TrackPage>;

    /// List one page of a playlist's tracks starting at `offset`.
    async fn playlist_tracks(&self, playlist_id: &str, offset: usize) -> EnrichResult<TrackPage>;
}

/// One page of a catalog listing.
#[derive(Debug, Clone, Default)]
pub struct TrackPage {
    /// Entry slots in listing order. An empty slot is a removed or
    /// regionally unavailable playlist entry.
    pub entries: Vec<Option<RawTrack>>,
    /// Offset of the next page, absent once the listing is exhausted.
    pub next_offset: Option<usize>,
}

// ---------------------------------------------------------------------------
// Raw entry types
// ---------------------------------------------------------------------------

/// A catalog track entry before normalization.
///
/// Every field is optional because the catalog omits fields freely,
/// especially for local files in playlists.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTrack {
    pub name: Option<String>,
    #[serde(default)]
    pub artists: Vec<RawArtist>,
    pub album: Option<RawAlbum>,
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArtist {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAlbum {
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Fetch
// ---------------------------------------------------------------------------

/// What a fetch produced.
///
/// A listing failure does not surface as an `Err` from [`fetch_tracks`];
/// instead the track list comes back empty and the underlying error
/// lands in `failure`, so callers can tell an empty entity apart from a
/// fetch that fell over.
#[derive(Debug)]
pub struct FetchOutcome {
    /// Normalized tracks in listing order.
    pub tracks: Vec<Track>,
    /// Pages actually consumed.
    pub pages: usize,
    /// True when the page cap was reached with a continuation pending.
    pub truncated: bool,
    /// The listing error that emptied the fetch, if any.
    pub failure: Option<EnrichError>,
}

/// Fetch every track of the referenced album or playlist.
///
/// Validates `reference`, pages through the entity's listing up to
/// [`MAX_PAGES`], skips empty entry slots, and normalizes the rest in
/// order.
///
/// # Errors
///
/// Returns an error only when `reference` is malformed; in that case
/// the catalog is never contacted. Listing errors are reported through
/// [`FetchOutcome::failure`] instead.
pub async fn fetch_tracks<C>(reference: &str, catalog: &C) -> EnrichResult<FetchOutcome>
where
    C: CatalogSource + ?Sized,
{
    let entity: EntityRef = reference.parse()?;

    log::debug!("Fetching tracks for {}", entity);

    let mut tracks = Vec::new();
    let mut pages = 0;
    let mut next = Some(0);
    let mut failure = None;

    while let Some(offset) = next {
        if pages >= MAX_PAGES {
            break;
        }

        match list_page(catalog, &entity, offset).await {
            Ok(page) => {
                for slot in page.entries {
                    // Removed playlist entries arrive as empty slots.
                    let Some(raw) = slot else { continue };
                    tracks.push(normalize(raw));
                }
                next = page.next_offset;
                pages += 1;
            }
            Err(e) => {
                log::warn!("Listing failed for {} at offset {}: {}", entity, offset, e);
                tracks.clear();
                failure = Some(e);
                break;
            }
        }
    }

    let truncated = failure.is_none() && next.is_some();
    if truncated {
        log::warn!(
            "Page cap of {} reached for {}; listing truncated",
            MAX_PAGES,
            entity
        );
    }

    log::info!("Fetched {} tracks for {} ({} pages)", tracks.len(), entity, pages);

    Ok(FetchOutcome {
        tracks,
        pages,
        truncated,
        failure,
    })
}

async fn list_page<C>(catalog: &C, entity: &EntityRef, offset: usize) -> EnrichResult<TrackPage>
where
    C: CatalogSource + ?Sized,
{
    match entity.kind {
        EntityKind::Album => catalog.album_tracks(&entity.id, offset).await,
        EntityKind::Playlist => catalog.playlist_tracks(&entity.id, offset).await,
    }
}

/// Map a raw entry onto the canonical record.
///
/// Missing fields become empty strings and only the first credited
/// artist is kept, so downstream matching never has to handle absent
/// metadata.
fn normalize(raw: RawTrack) -> Track {
    Track::new(
        raw.name.unwrap_or_default(),
        raw.artists
            .into_iter()
            .next()
            .and_then(|artist| artist.name)
            .unwrap_or_default(),
        raw.album.and_then(|album| album.name).unwrap_or_default(),
        raw.uri.unwrap_or_default(),
    )
}
