//! Track reference model and CLI import helpers.
//!
//! A [`TrackRecord`] is one entry of a session or playlist track list. The
//! store never touches the referenced media itself; the record carries the
//! metadata the player needs to rebuild its queue after a restore.
//!
//! Track lists enter the CLI either as a JSON array of records
//! ([`load_tracks`]) or as bare file paths ([`tracks_from_paths`]), which
//! become minimal records with absolutized URLs.

use anyhow::{Context, Result};
use path_absolutize::Absolutize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// How a track — and associated metadata — is stored in the database.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackRecord {
    pub title: String,
    pub artist: String,
    pub artist_id: i64,
    pub album: String,
    pub album_id: i64,
    /// Track length in milliseconds.
    pub duration_ms: i64,
    /// Position on the source album, not in the saved list.
    pub track_number: i64,
    /// Location of the media, as a URL or absolute path.
    pub url: String,
    /// Identifier within the player's media index.
    pub media_id: i64,
}

impl TrackRecord {
    /// Build a minimal record for a local file. Metadata fields stay at
    /// their defaults; the file stem stands in for the title.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        Self {
            title: path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default(),
            url: path.to_string_lossy().into_owned(),
            ..Self::default()
        }
    }
}

/// Load a track list from a JSON file.
///
/// Accepts an array of [`TrackRecord`] objects; missing fields take their
/// defaults so a bare `[{"url": "..."}]` list is valid input.
pub fn load_tracks(path: &Path) -> Result<Vec<TrackRecord>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read track list from {}", path.display()))?;

    let tracks: Vec<TrackRecord> = serde_json::from_str(&data)
        .with_context(|| format!("Invalid track list JSON in {}", path.display()))?;

    log::debug!("Loaded {} tracks from {}", tracks.len(), path.display());
    Ok(tracks)
}

/// Build track records from raw file paths.
///
/// Paths are absolutized against the current directory so the stored URL
/// stays valid no matter where the player resolves it from later.
pub fn tracks_from_paths(paths: &[PathBuf]) -> Result<Vec<TrackRecord>> {
    paths
        .iter()
        .map(|path| {
            let absolute = path
                .absolutize()
                .with_context(|| format!("Failed to absolutize track path {}", path.display()))?;
            Ok(TrackRecord::from_path(&absolute))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_json_fills_defaults() {
        let tracks: Vec<TrackRecord> =
            serde_json::from_str(r#"[{"url": "/music/a.flac"}]"#).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].url, "/music/a.flac");
        assert_eq!(tracks[0].artist, "");
        assert_eq!(tracks[0].duration_ms, 0);
    }

    #[test]
    fn record_from_path_uses_file_stem_as_title() {
        let record = TrackRecord::from_path(Path::new("/music/artist/album/song.flac"));
        assert_eq!(record.title, "song");
        assert_eq!(record.url, "/music/artist/album/song.flac");
        assert_eq!(record.media_id, 0);
    }

    #[test]
    fn tracks_from_paths_absolutizes_relative_input() {
        let records = tracks_from_paths(&[PathBuf::from("some/song.flac")]).unwrap();
        assert_eq!(records.len(), 1);
        assert!(Path::new(&records[0].url).is_absolute());
        assert!(records[0].url.ends_with("song.flac"));
    }
}
