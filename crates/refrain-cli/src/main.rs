use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "refrain", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Fetch an album or playlist and resolve lyrics ids for its tracks
    ///
    /// Runs the full enrichment pipeline. First the referenced entity's
    /// track listing is paged through and normalized:
    ///
    /// - Track name, first credited artist, album name, and catalog URI
    /// - Removed or unavailable playlist entries are skipped
    /// - Listings are capped at 20 pages (roughly 2000 tracks)
    ///
    /// Then each track is matched against the lyrics database by fuzzy
    /// search, in listing order, with a fixed pause between attempts and
    /// a longer cooldown whenever the service rate-limits. A candidate
    /// is accepted only when its artist credit and the track's artist
    /// contain one another, case-insensitively. Tracks that cannot be
    /// matched are kept without an id.
    ///
    /// The reference is a compound string such as
    /// 'spotify:album:4aawyAB9vmqN3uQ7FjRGTy' or
    /// 'spotify:playlist:37i9dQZF1DXcBWIGoYBM5M'.
    ///
    /// Credentials come from the config file or REFRAIN_* environment
    /// variables; see 'refrain config example'.
    Enrich {
        /// Album or playlist reference
        reference: String,

        /// Write the enriched tracks to a JSON file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pause between search attempts, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Search attempts allowed per track
        #[arg(long)]
        max_retries: Option<u32>,
    },
    /// Fetch an album's or playlist's tracks without resolving ids
    Tracks {
        /// Album or playlist reference
        reference: String,

        /// Write the fetched tracks to a JSON file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Debug, clap::Subcommand)]
enum ConfigCommands {
    /// Show the current effective configuration
    Show,
    /// Get a config value (or the whole file when no key is given)
    Get {
        /// Config key to read
        key: Option<String>,
    },
    /// Set a config value in the config file
    Set {
        /// Config key to write
        key: String,
        /// New value
        value: String,
    },
    /// Show the config file path
    Path,
    /// Show example configuration
    Example,
    /// Create the config file with defaults if missing
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Enrich {
            reference,
            output,
            delay_ms,
            max_retries,
        } => {
            commands::run_enrich(reference, output, delay_ms, max_retries).await?;
        }
        Commands::Tracks { reference, output } => {
            commands::run_tracks(reference, output).await?;
        }
        Commands::Config(command) => match command {
            ConfigCommands::Show => commands::config::show_config()?,
            ConfigCommands::Get { key } => commands::config::get_config(key)?,
            ConfigCommands::Set { key, value } => commands::config::set_config(key, value)?,
            ConfigCommands::Path => commands::config::show_path()?,
            ConfigCommands::Example => commands::config::show_example()?,
            ConfigCommands::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}
