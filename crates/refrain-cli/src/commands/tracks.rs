use std::path::PathBuf;

use anyhow::{Context, Result};

use refrain_etl::{fetch_tracks, Config, SpotifyClient};

use crate::commands::{export, print_tracks, spotify_credentials};

pub async fn run_tracks(reference: String, output: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let (client_id, client_secret) = spotify_credentials(&config)?;

    let spotify = SpotifyClient::connect(client_id, client_secret)
        .await
        .context("Failed to connect to Spotify")?;

    let outcome = fetch_tracks(&reference, &spotify).await?;

    if let Some(failure) = &outcome.failure {
        println!("Catalog fetch failed: {}", failure);
        if failure.is_transient() {
            println!("The error looks transient; try again shortly.");
        }
        return Ok(());
    }

    if outcome.tracks.is_empty() {
        println!("No tracks found for {}", reference);
        return Ok(());
    }

    println!();
    print_tracks(&outcome.tracks, false);

    println!(
        "\n  {} tracks across {} pages{}",
        outcome.tracks.len(),
        outcome.pages,
        if outcome.truncated {
            " (page cap reached, listing truncated)"
        } else {
            ""
        }
    );

    if let Some(path) = output {
        export::write_tracks(&path, &reference, &outcome.tracks)?;
        println!("\n✓ Wrote {} tracks to {}", outcome.tracks.len(), path.display());
    }

    Ok(())
}
