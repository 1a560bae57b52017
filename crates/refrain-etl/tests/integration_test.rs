//! Integration tests for the full fetch → resolve pipeline.
//!
//! These tests use mock catalog and search collaborators to verify the
//! pipeline works correctly without real Spotify/Genius API calls. The
//! paused tokio clock makes every throttling wait complete instantly.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use refrain_etl::catalog::{RawAlbum, RawArtist, RawTrack, TrackPage};
use refrain_etl::{
    fetch_tracks, resolve_ids, run_pipeline, CatalogSource, EnrichError, EnrichResult,
    LyricsSearch, MatchOptions, SongMatch,
};

fn entry(n: usize) -> Option<RawTrack> {
    Some(RawTrack {
        name: Some(format!("Track {n:02}")),
        artists: vec![RawArtist {
            name: Some(format!("Artist {n:02}")),
        }],
        album: Some(RawAlbum {
            name: Some("Integration Album".to_string()),
        }),
        uri: Some(format!("spotify:track:it{n:02}")),
    })
}

/// Serves pre-built pages, treating `offset` as a page index.
struct PagedCatalog {
    pages: Vec<TrackPage>,
    calls: AtomicUsize,
}

impl PagedCatalog {
    fn new(pages: Vec<TrackPage>) -> Self {
        Self {
            pages,
            calls: AtomicUsize::new(0),
        }
    }

    /// Three pages holding 45 entry slots (20 + 20 + 5); slot 27 is an
    /// empty playlist entry.
    fn forty_five_with_one_gap() -> Self {
        let mut slots: Vec<Option<RawTrack>> = (0..45).map(entry).collect();
        slots[27] = None;

        let mut pages = Vec::new();
        let mut it = slots.into_iter();
        let mut index = 0;
        for size in [20usize, 20, 5] {
            let entries: Vec<Option<RawTrack>> = it.by_ref().take(size).collect();
            index += 1;
            pages.push(TrackPage {
                entries,
                next_offset: if index < 3 { Some(index) } else { None },
            });
        }

        Self::new(pages)
    }
}

#[async_trait]
impl CatalogSource for PagedCatalog {
    async fn album_tracks(&self, id: &str, offset: usize) -> EnrichResult<TrackPage> {
        self.playlist_tracks(id, offset).await
    }

    async fn playlist_tracks(&self, _id: &str, offset: usize) -> EnrichResult<TrackPage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.pages[offset].clone())
    }
}

/// Accepts every search with a hit credited to the searched artist.
struct EchoSearch {
    calls: AtomicUsize,
}

impl EchoSearch {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl LyricsSearch for EchoSearch {
    async fn search_song(&self, title: &str, artist: &str) -> EnrichResult<Option<SongMatch>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(SongMatch {
            id: 100_000 + call as u64,
            title: title.to_string(),
            artist: artist.to_string(),
        }))
    }
}

/// Every call fails with a rate-limit error.
struct RateLimitedSearch {
    calls: AtomicUsize,
}

#[async_trait]
impl LyricsSearch for RateLimitedSearch {
    async fn search_song(&self, _title: &str, _artist: &str) -> EnrichResult<Option<SongMatch>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(EnrichError::RateLimited {
            source_name: "Genius".to_string(),
        })
    }
}

#[tokio::test]
async fn test_fetch_collects_pages_and_skips_gaps() {
    let catalog = PagedCatalog::forty_five_with_one_gap();

    let outcome = fetch_tracks("spotify:playlist:integration", &catalog)
        .await
        .unwrap();

    assert_eq!(outcome.tracks.len(), 44);
    assert_eq!(outcome.pages, 3);
    assert!(!outcome.truncated);
    assert!(outcome.failure.is_none());
    assert_eq!(catalog.calls.load(Ordering::SeqCst), 3);

    // Listing order survives pagination; the empty slot (27) is the
    // only entry missing.
    assert_eq!(outcome.tracks[0].track_name, "Track 00");
    assert_eq!(outcome.tracks[26].track_name, "Track 26");
    assert_eq!(outcome.tracks[27].track_name, "Track 28");
    assert_eq!(outcome.tracks[43].track_name, "Track 44");
}

#[tokio::test(start_paused = true)]
async fn test_pipeline_resolves_every_track() {
    let catalog = PagedCatalog::forty_five_with_one_gap();
    let search = EchoSearch::new();
    let options = MatchOptions::default();

    let report = run_pipeline("spotify:playlist:integration", &catalog, &search, &options)
        .await
        .unwrap();

    assert_eq!(report.tracks.len(), 44);
    assert_eq!(report.resolved, 44);
    assert_eq!(report.unresolved, 0);
    // One accepted attempt per track.
    assert_eq!(search.calls.load(Ordering::SeqCst), 44);
    assert!(report.tracks.iter().all(|t| t.lyrics_id.is_some()));
}

#[tokio::test(start_paused = true)]
async fn test_pipeline_survives_rate_limited_search() {
    let catalog = PagedCatalog::new(vec![TrackPage {
        entries: vec![entry(1), entry(2)],
        next_offset: None,
    }]);
    let search = RateLimitedSearch {
        calls: AtomicUsize::new(0),
    };
    let options = MatchOptions::default();

    let report = run_pipeline("spotify:album:integration", &catalog, &search, &options)
        .await
        .unwrap();

    // Two retries per track, no panic, everything unresolved.
    assert_eq!(search.calls.load(Ordering::SeqCst), 4);
    assert_eq!(report.resolved, 0);
    assert_eq!(report.unresolved, 2);
}

#[tokio::test]
async fn test_pipeline_invalid_reference_contacts_nothing() {
    let catalog = PagedCatalog::new(vec![]);
    let search = EchoSearch::new();
    let options = MatchOptions::default();

    let result = run_pipeline("spotify:show:podcast", &catalog, &search, &options).await;

    assert!(result.is_err());
    assert_eq!(catalog.calls.load(Ordering::SeqCst), 0);
    assert_eq!(search.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_resolve_then_export_shape() {
    let catalog = PagedCatalog::new(vec![TrackPage {
        entries: vec![entry(1)],
        next_offset: None,
    }]);
    let search = EchoSearch::new();

    let outcome = fetch_tracks("spotify:album:integration", &catalog)
        .await
        .unwrap();
    let tracks = resolve_ids(outcome.tracks, &search, &MatchOptions::default()).await;

    // Resolved tracks serialize with every canonical field present.
    let json = serde_json::to_value(&tracks).unwrap();
    assert_eq!(json[0]["track_name"], "Track 01");
    assert_eq!(json[0]["first_artist"], "Artist 01");
    assert_eq!(json[0]["album_name"], "Integration Album");
    assert_eq!(json[0]["catalog_uri"], "spotify:track:it01");
    assert_eq!(json[0]["lyrics_id"], "100000");
}
