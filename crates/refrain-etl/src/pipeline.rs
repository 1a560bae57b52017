//! Enrichment pipeline orchestration.
//!
//! Wires the two stages together: fetch the referenced entity's tracks
//! from the catalog, then resolve a lyrics id for each track.

use chrono::{DateTime, Utc};
use tokio::time::Instant;

use refrain_core::model::Track;

use crate::catalog::{fetch_tracks, CatalogSource};
use crate::error::{EnrichError, EnrichResult};
use crate::lyrics::{resolve_ids, LyricsSearch, MatchOptions};

/// Outcome of one full enrichment run.
#[derive(Debug)]
pub struct PipelineReport {
    /// Final track sequence, ids attached where matching succeeded.
    pub tracks: Vec<Track>,
    /// Catalog pages consumed.
    pub pages: usize,
    /// True when the listing was cut off at the page cap.
    pub truncated: bool,
    /// The catalog failure that emptied the fetch, if any.
    pub fetch_failure: Option<EnrichError>,
    /// Tracks that carry a lyrics id.
    pub resolved: usize,
    /// Tracks that do not.
    pub unresolved: usize,
    /// Wall-clock duration of the run.
    pub elapsed: std::time::Duration,
    /// When the run finished.
    pub finished_at: DateTime<Utc>,
}

/// Run the full enrichment pipeline for one album or playlist.
///
/// # Errors
///
/// Returns an error only when `reference` is malformed. Catalog
/// failures degrade into [`PipelineReport::fetch_failure`] with an
/// empty track list, and unresolved tracks simply pass through without
/// an id.
pub async fn run_pipeline<C, S>(
    reference: &str,
    catalog: &C,
    search: &S,
    options: &MatchOptions,
) -> EnrichResult<PipelineReport>
where
    C: CatalogSource + ?Sized,
    S: LyricsSearch + ?Sized,
{
    let started = Instant::now();

    log::info!("Starting enrichment for {}", reference);

    let outcome = fetch_tracks(reference, catalog).await?;
    let pages = outcome.pages;
    let truncated = outcome.truncated;
    let fetch_failure = outcome.failure;

    let tracks = resolve_ids(outcome.tracks, search, options).await;

    let resolved = tracks.iter().filter(|t| t.is_resolved()).count();
    let unresolved = tracks.len() - resolved;

    log::info!(
        "Enrichment finished: {} tracks, {} resolved, {} unresolved",
        tracks.len(),
        resolved,
        unresolved
    );

    Ok(PipelineReport {
        tracks,
        pages,
        truncated,
        fetch_failure,
        resolved,
        unresolved,
        elapsed: started.elapsed(),
        finished_at: Utc::now(),
    })
}
