use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use refrain_core::model::Track;

/// Envelope written by `--output`.
#[derive(Debug, Serialize)]
struct TracksDocument<'a> {
    reference: &'a str,
    exported_at: DateTime<Utc>,
    track_count: usize,
    tracks: &'a [Track],
}

/// Write the track list as pretty-printed JSON.
pub fn write_tracks(path: &Path, reference: &str, tracks: &[Track]) -> Result<()> {
    let document = TracksDocument {
        reference,
        exported_at: Utc::now(),
        track_count: tracks.len(),
        tracks,
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(file, &document)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn test_write_tracks_produces_envelope() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tracks.json");

        let tracks = vec![
            Track::new("Nikes", "Frank Ocean", "Blonde", "spotify:track:1")
                .with_lyrics_id("2263"),
            Track::new("Ivy", "Frank Ocean", "Blonde", "spotify:track:2"),
        ];

        write_tracks(&path, "spotify:album:blonde", &tracks).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();

        assert_eq!(parsed["reference"], "spotify:album:blonde");
        assert_eq!(parsed["track_count"], 2);
        assert!(parsed["exported_at"].is_string());
        assert_eq!(parsed["tracks"][0]["track_name"], "Nikes");
        assert_eq!(parsed["tracks"][0]["lyrics_id"], "2263");
        assert_eq!(parsed["tracks"][1]["lyrics_id"], serde_json::Value::Null);
    }

    #[test]
    fn test_write_tracks_empty_list() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.json");

        write_tracks(&path, "spotify:playlist:empty", &[]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();

        assert_eq!(parsed["track_count"], 0);
        assert!(parsed["tracks"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_write_tracks_bad_directory_fails() {
        let result = write_tracks(
            Path::new("/nonexistent-dir/tracks.json"),
            "spotify:album:x",
            &[],
        );
        assert!(result.is_err());
    }
}
