use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use refrain_etl::{run_pipeline, Config, GeniusClient, PipelineReport, SpotifyClient};

use crate::commands::{export, print_tracks, spotify_credentials};

pub async fn run_enrich(
    reference: String,
    output: Option<PathBuf>,
    delay_ms: Option<u64>,
    max_retries: Option<u32>,
) -> Result<()> {
    log::info!("Starting enrichment");

    let config = Config::load()?;

    let mut options = config.match_options();
    if let Some(delay_ms) = delay_ms {
        options.delay = Duration::from_millis(delay_ms);
    }
    if let Some(max_retries) = max_retries {
        options.max_retries = max_retries;
    }

    let (client_id, client_secret) = spotify_credentials(&config)?;
    let Some(token) = config.genius_access_token.as_deref() else {
        bail!(
            "Genius access token not configured.\n\n\
             Set genius_access_token with 'refrain config set', or export\n\
             REFRAIN_GENIUS_ACCESS_TOKEN."
        );
    };

    let spotify = SpotifyClient::connect(client_id, client_secret)
        .await
        .context("Failed to connect to Spotify")?;
    let genius = GeniusClient::new(token.to_string()).context("Failed to build Genius client")?;

    let report = run_pipeline(&reference, &spotify, &genius, &options).await?;

    print_report(&reference, &report);

    if let Some(path) = output {
        export::write_tracks(&path, &reference, &report.tracks)?;
        println!("\n✓ Wrote {} tracks to {}", report.tracks.len(), path.display());
    }

    Ok(())
}

fn print_report(reference: &str, report: &PipelineReport) {
    println!("\nEnrichment Report");
    println!("=================\n");

    println!("  Reference: {}", reference);
    println!("  Pages fetched: {}", report.pages);

    if report.truncated {
        println!("  Note: page cap reached, listing truncated");
    }

    if let Some(failure) = &report.fetch_failure {
        println!("\n  Catalog fetch failed: {}", failure);
        if failure.is_transient() {
            println!("  The error looks transient; try again shortly.");
        }
        return;
    }

    if !report.tracks.is_empty() {
        println!();
        print_tracks(&report.tracks, true);
    }

    println!(
        "\n  {} tracks: {} resolved, {} unresolved ({:.1?} elapsed)",
        report.tracks.len(),
        report.resolved,
        report.unresolved,
        report.elapsed
    );
}
