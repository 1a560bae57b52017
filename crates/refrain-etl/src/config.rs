use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::lyrics::{MatchOptions, DEFAULT_MAX_RETRIES, DEFAULT_SEARCH_DELAY_MS};

/// Configuration for refrain.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (REFRAIN_* prefix)
/// 3. Config file (~/.config/refrain/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Spotify application client id (required for catalog access).
    ///
    /// Can be set via:
    /// - ENV: REFRAIN_SPOTIFY_CLIENT_ID
    /// - Config: spotify_client_id = "..."
    pub spotify_client_id: Option<String>,

    /// Spotify application client secret (required for catalog access).
    ///
    /// Can be set via:
    /// - ENV: REFRAIN_SPOTIFY_CLIENT_SECRET
    /// - Config: spotify_client_secret = "..."
    pub spotify_client_secret: Option<String>,

    /// Genius API access token (required for lyrics-id matching).
    ///
    /// Can be set via:
    /// - ENV: REFRAIN_GENIUS_ACCESS_TOKEN
    /// - Config: genius_access_token = "..."
    pub genius_access_token: Option<String>,

    /// Pause between lyrics search attempts, in milliseconds.
    ///
    /// Can be set via:
    /// - CLI: --delay-ms 500
    /// - ENV: REFRAIN_SEARCH_DELAY_MS
    /// - Config: search_delay_ms = 500
    #[serde(default = "default_search_delay_ms")]
    pub search_delay_ms: u64,

    /// Lyrics search attempts allowed per track.
    ///
    /// Can be set via:
    /// - CLI: --max-retries 2
    /// - ENV: REFRAIN_SEARCH_MAX_RETRIES
    /// - Config: search_max_retries = 2
    #[serde(default = "default_search_max_retries")]
    pub search_max_retries: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spotify_client_id: None,
            spotify_client_secret: None,
            genius_access_token: None,
            search_delay_ms: DEFAULT_SEARCH_DELAY_MS,
            search_max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/refrain/config.toml
    /// Reads environment variables with REFRAIN_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        // Create Confygery builder
        let mut builder = Confygery::new()
            .context("Failed to create config builder")?;

        // If config file exists, load it
        if config_path.exists() {
            let path_str = config_path.to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder.add_file(path_str)
                .context("Failed to load config file")?;
        }

        // Set up environment variable scanning with REFRAIN_ prefix
        let env_opts = env::Options::with_top_level("refrain");
        builder.add_env(env_opts)
            .context("Failed to load environment variables")?;

        // Build and deserialize into Config
        let config: Self = builder.build()
            .context("Failed to build configuration")?;

        Ok(config)
    }

    /// Matcher tunables derived from this configuration.
    #[must_use]
    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            delay: Duration::from_millis(self.search_delay_ms),
            max_retries: self.search_max_retries,
        }
    }
}

fn default_search_delay_ms() -> u64 {
    DEFAULT_SEARCH_DELAY_MS
}

fn default_search_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/refrain/config.toml
/// - macOS: ~/Library/Application Support/refrain/config.toml
/// - Windows: %APPDATA%\refrain\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("refrain")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Refrain Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (REFRAIN_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Spotify application credentials
# Required for reading album and playlist tracks
#
# Register an application at: https://developer.spotify.com/dashboard
#
# Can also be set via:
# - Environment: REFRAIN_SPOTIFY_CLIENT_ID=your-id-here
# - Environment: REFRAIN_SPOTIFY_CLIENT_SECRET=your-secret-here
spotify_client_id = "your-spotify-client-id-here"
spotify_client_secret = "your-spotify-client-secret-here"

# Genius API access token
# Required for resolving lyrics ids
#
# Generate a client access token at: https://genius.com/api-clients
#
# Can also be set via:
# - Environment: REFRAIN_GENIUS_ACCESS_TOKEN=your-token-here
genius_access_token = "your-genius-access-token-here"

# Pause between lyrics search attempts, in milliseconds
#
# Can also be set via:
# - CLI: refrain enrich --delay-ms 500 <reference>
# - Environment: REFRAIN_SEARCH_DELAY_MS=500
#
# Default: 500
#search_delay_ms = 500

# Lyrics search attempts allowed per track
#
# Can also be set via:
# - CLI: refrain enrich --max-retries 2 <reference>
# - Environment: REFRAIN_SEARCH_MAX_RETRIES=2
#
# Default: 2
#search_max_retries = 2
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    // Create parent directory
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .context("Failed to create config directory")?;
    }

    // Write default config
    std::fs::write(&config_path, example_config())
        .context("Failed to write config file")?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.spotify_client_id.is_none());
        assert!(config.genius_access_token.is_none());
        assert_eq!(config.search_delay_ms, 500);
        assert_eq!(config.search_max_retries, 2);
    }

    #[test]
    fn test_config_load() {
        // Should not fail even if config file doesn't exist
        let result = Config::load();
        assert!(result.is_ok());
    }

    #[test]
    fn test_example_config_parses() {
        let config: Config = toml::from_str(example_config()).unwrap();
        assert_eq!(
            config.spotify_client_id.as_deref(),
            Some("your-spotify-client-id-here")
        );
        assert_eq!(
            config.genius_access_token.as_deref(),
            Some("your-genius-access-token-here")
        );
        // Commented-out keys fall back to defaults
        assert_eq!(config.search_delay_ms, 500);
        assert_eq!(config.search_max_retries, 2);
    }

    #[test]
    fn test_match_options_from_config() {
        let config = Config {
            search_delay_ms: 250,
            search_max_retries: 4,
            ..Config::default()
        };
        let options = config.match_options();
        assert_eq!(options.delay, Duration::from_millis(250));
        assert_eq!(options.max_retries, 4);
    }
}
