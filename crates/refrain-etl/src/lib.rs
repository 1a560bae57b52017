//! Enrichment pipeline for refrain.
//!
//! Implements the two pipeline stages, paginated catalog retrieval and
//! throttled lyrics-id resolution, together with the concrete Spotify
//! and Genius clients, configuration loading, and a one-call
//! orchestration entry point.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod lyrics;
pub mod pipeline;

pub use catalog::spotify::SpotifyClient;
pub use catalog::{fetch_tracks, CatalogSource, FetchOutcome};
pub use config::Config;
pub use error::{EnrichError, EnrichResult};
pub use lyrics::genius::GeniusClient;
pub use lyrics::{is_good_match, resolve_ids, LyricsSearch, MatchOptions, SongMatch};
pub use pipeline::{run_pipeline, PipelineReport};
