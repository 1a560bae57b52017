use serde::{Deserialize, Serialize};

/// A single catalog track in canonical form.
///
/// Built once by the catalog reader during normalization and treated as
/// immutable afterwards: the matcher never edits a `Track` in place, it
/// derives a copy via [`Track::with_lyrics_id`]. An absent `lyrics_id` is
/// a valid terminal state meaning the track was never resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Track title as reported by the catalog.
    pub track_name: String,

    /// The first credited artist.
    pub first_artist: String,

    /// Album title, empty for entries the catalog reports without one.
    pub album_name: String,

    /// Opaque catalog identifier (e.g. `spotify:track:...`).
    pub catalog_uri: String,

    /// Lyrics-database identifier, set by the matcher when a search
    /// candidate is accepted.
    pub lyrics_id: Option<String>,
}

impl Track {
    #[must_use]
    pub fn new(
        track_name: impl Into<String>,
        first_artist: impl Into<String>,
        album_name: impl Into<String>,
        catalog_uri: impl Into<String>,
    ) -> Self {
        Self {
            track_name: track_name.into(),
            first_artist: first_artist.into(),
            album_name: album_name.into(),
            catalog_uri: catalog_uri.into(),
            lyrics_id: None,
        }
    }

    /// Derive a copy of this track with `lyrics_id` set.
    #[must_use]
    pub fn with_lyrics_id(mut self, lyrics_id: impl Into<String>) -> Self {
        self.lyrics_id = Some(lyrics_id.into());
        self
    }

    /// Whether this track has been resolved to a lyrics-database id.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.lyrics_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_new_starts_unresolved() {
        let track = Track::new("Halo", "Beyoncé", "I Am... Sasha Fierce", "spotify:track:abc");

        assert_eq!(track.track_name, "Halo");
        assert_eq!(track.first_artist, "Beyoncé");
        assert_eq!(track.album_name, "I Am... Sasha Fierce");
        assert_eq!(track.catalog_uri, "spotify:track:abc");
        assert!(track.lyrics_id.is_none());
        assert!(!track.is_resolved());
    }

    #[test]
    fn test_with_lyrics_id_derives_resolved_copy() {
        let track = Track::new("Halo", "Beyoncé", "I Am... Sasha Fierce", "spotify:track:abc");
        let resolved = track.clone().with_lyrics_id("51087");

        assert_eq!(resolved.lyrics_id.as_deref(), Some("51087"));
        assert!(resolved.is_resolved());

        // Everything but the id carries over untouched.
        assert_eq!(resolved.track_name, track.track_name);
        assert_eq!(resolved.first_artist, track.first_artist);
        assert_eq!(resolved.album_name, track.album_name);
        assert_eq!(resolved.catalog_uri, track.catalog_uri);

        // The source value is still unresolved.
        assert!(track.lyrics_id.is_none());
    }

    #[test]
    fn test_track_allows_empty_fields() {
        let track = Track::new("", "", "", "");
        assert_eq!(track.track_name, "");
        assert!(!track.is_resolved());
    }
}
