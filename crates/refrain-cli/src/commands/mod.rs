pub mod config;
pub mod enrich;
pub mod export;
pub mod tracks;

pub use enrich::run_enrich;
pub use tracks::run_tracks;

use anyhow::{bail, Result};
use refrain_etl::Config;

/// Pull the Spotify credential pair out of the configuration.
pub(crate) fn spotify_credentials(config: &Config) -> Result<(&str, &str)> {
    match (
        config.spotify_client_id.as_deref(),
        config.spotify_client_secret.as_deref(),
    ) {
        (Some(id), Some(secret)) => Ok((id, secret)),
        _ => bail!(
            "Spotify credentials not configured.\n\n\
             Set spotify_client_id and spotify_client_secret with\n\
             'refrain config set', or export REFRAIN_SPOTIFY_CLIENT_ID and\n\
             REFRAIN_SPOTIFY_CLIENT_SECRET."
        ),
    }
}

/// Print the track table.
///
/// Unresolved tracks show '-' in the lyrics-id column; the column is
/// omitted entirely when `with_ids` is false.
pub(crate) fn print_tracks(tracks: &[refrain_core::model::Track], with_ids: bool) {
    if with_ids {
        println!("  {:>4}  {:<40}  {:<24}  {}", "#", "Track", "Artist", "Lyrics id");
    } else {
        println!("  {:>4}  {:<40}  {:<24}", "#", "Track", "Artist");
    }

    for (index, track) in tracks.iter().enumerate() {
        let name = clip(&track.track_name, 40);
        let artist = clip(&track.first_artist, 24);
        if with_ids {
            let id = track.lyrics_id.as_deref().unwrap_or("-");
            println!("  {:>4}  {:<40}  {:<24}  {}", index + 1, name, artist, id);
        } else {
            println!("  {:>4}  {:<40}  {:<24}", index + 1, name, artist);
        }
    }
}

/// Shorten `text` to at most `max` characters for table display.
fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let clipped: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{clipped}...")
    }
}
