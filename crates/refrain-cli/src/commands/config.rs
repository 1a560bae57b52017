use anyhow::{Context, Result};
use refrain_etl::{config, Config};

const STRING_KEYS: &[&str] = &[
    "spotify_client_id",
    "spotify_client_secret",
    "genius_access_token",
];

const INTEGER_KEYS: &[&str] = &["search_delay_ms", "search_max_retries"];

fn valid_keys() -> String {
    STRING_KEYS
        .iter()
        .chain(INTEGER_KEYS.iter())
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}

/// Hide a credential's value, reporting only whether it is set.
fn presence(value: Option<&str>) -> &'static str {
    if value.is_some() {
        "(set)"
    } else {
        "<not set>"
    }
}

/// Show the current effective configuration.
pub fn show_config() -> Result<()> {
    let config = Config::load()?;

    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config::config_file_path().display());

    let exists = config::config_file_path().exists();
    println!("File exists: {}\n", if exists { "yes" } else { "no (using defaults)" });

    println!("Settings:");
    println!(
        "  spotify_client_id: {}",
        config.spotify_client_id.as_deref().unwrap_or("<not set>")
    );
    println!(
        "  spotify_client_secret: {}",
        presence(config.spotify_client_secret.as_deref())
    );
    println!(
        "  genius_access_token: {}",
        presence(config.genius_access_token.as_deref())
    );
    println!("  search_delay_ms: {}", config.search_delay_ms);
    println!("  search_max_retries: {}", config.search_max_retries);

    println!("\nPriority: CLI args > ENV vars (REFRAIN_*) > Config file > Defaults");

    Ok(())
}

/// Get a specific config value.
pub fn get_config(key: Option<String>) -> Result<()> {
    if let Some(key) = key {
        let config = Config::load()?;

        match key.as_str() {
            "spotify_client_id" => {
                println!("{}", config.spotify_client_id.unwrap_or_else(|| String::from("<not set>")));
            }
            "spotify_client_secret" => {
                println!("{}", config.spotify_client_secret.unwrap_or_else(|| String::from("<not set>")));
            }
            "genius_access_token" => {
                println!("{}", config.genius_access_token.unwrap_or_else(|| String::from("<not set>")));
            }
            "search_delay_ms" => {
                println!("{}", config.search_delay_ms);
            }
            "search_max_retries" => {
                println!("{}", config.search_max_retries);
            }
            _ => {
                anyhow::bail!("Unknown config key: {}\n\nValid keys: {}", key, valid_keys());
            }
        }
    } else {
        // No key provided, show entire config file contents
        let config_path = config::config_file_path();

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            print!("{}", contents);
        } else {
            println!("Config file does not exist: {}", config_path.display());
            println!("\nRun 'refrain config init' to create it.");
        }
    }

    Ok(())
}

/// Set a config value, preserving comments in the config file.
pub fn set_config(key: String, value: String) -> Result<()> {
    let config_path = config::config_file_path();

    // Ensure config file exists
    config::ensure_config_file()?;

    let contents = std::fs::read_to_string(&config_path)
        .context("Failed to read config file")?;
    let mut doc = contents
        .parse::<toml_edit::DocumentMut>()
        .context("Failed to parse config file")?;

    if STRING_KEYS.contains(&key.as_str()) {
        doc[key.as_str()] = toml_edit::value(value.as_str());
    } else if INTEGER_KEYS.contains(&key.as_str()) {
        let numeric: i64 = value
            .parse()
            .with_context(|| format!("{} expects an integer, got '{}'", key, value))?;
        doc[key.as_str()] = toml_edit::value(numeric);
    } else {
        anyhow::bail!("Unknown config key: {}\n\nValid keys: {}", key, valid_keys());
    }

    std::fs::write(&config_path, doc.to_string())
        .context("Failed to write config file")?;

    println!("✓ Updated {}", key);
    println!("  in {}", config_path.display());

    Ok(())
}

/// Show the config file path.
pub fn show_path() -> Result<()> {
    let config_path = config::config_file_path();
    println!("{}", config_path.display());
    Ok(())
}

/// Show example configuration.
pub fn show_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure refrain.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}
