//! Saved playlists: user-named track lists independent of sessions.
//!
//! Unlike a bookmark, a playlist carries no playback snapshot — just an
//! ordered track list under a title. Titles are unique: saving under an
//! existing title replaces that playlist and its tracks. Track positions
//! are stored 1-based.

use crate::store::{track_from_row, SessionStore, TRACK_COLUMNS};
use crate::track::TrackRecord;
use anyhow::{Context, Result};
use log::debug;
use rusqlite::{params, OptionalExtension};
use serde::Serialize;

/// Listing projection of one saved playlist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlaylistInfo {
    pub id: i64,
    pub title: String,
    pub track_count: i64,
}

impl SessionStore {
    /// Save a track list under a title, replacing any playlist that
    /// already carries it. Returns the new playlist's id.
    pub fn save_playlist(&mut self, title: &str, tracks: &[TrackRecord]) -> Result<i64> {
        debug!("Saving playlist '{title}' with {} tracks", tracks.len());

        let tx = self
            .conn
            .transaction()
            .context("Failed to begin playlist save transaction.")?;

        let superseded: Option<i64> = tx
            .query_row(
                "SELECT id FROM playlists WHERE title = ?1",
                [title],
                |row| row.get(0),
            )
            .optional()
            .context("Failed to query playlist by title.")?;

        if let Some(id) = superseded {
            tx.execute("DELETE FROM playlist_tracks WHERE playlist_id = ?1", [id])
                .context("Failed to DELETE superseded playlist tracks.")?;
            tx.execute("DELETE FROM playlists WHERE id = ?1", [id])
                .context("Failed to DELETE superseded playlist row.")?;
        }

        tx.execute(
            "INSERT INTO playlists (title, track_count) VALUES (?1, ?2)",
            params![title, tracks.len() as i64],
        )
        .context("Invalid SQL statement when INSERTing playlist row.")?;

        let playlist_id = tx.last_insert_rowid();

        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO playlist_tracks
                     (playlist_id, position, title, artist, artist_id, album,
                      album_id, duration, track_number, url, media_id)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                )
                .context("Invalid SQL statement when INSERTing playlist tracks.")?;

            for (index, track) in tracks.iter().enumerate() {
                stmt.execute(params![
                    playlist_id,
                    index as i64 + 1,
                    track.title,
                    track.artist,
                    track.artist_id,
                    track.album,
                    track.album_id,
                    track.duration_ms,
                    track.track_number,
                    track.url,
                    track.media_id,
                ])
                .with_context(|| format!("Failed to INSERT playlist track: {track:?}"))?;
            }
        }

        tx.commit().context("Committing SQL transaction failed.")?;
        Ok(playlist_id)
    }

    /// All saved playlists, ordered by title.
    pub fn playlists(&self) -> Result<Vec<PlaylistInfo>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, track_count FROM playlists ORDER BY title")
            .context("Invalid SQL statement when SELECTing playlists.")?;

        let rows = stmt
            .query_map([], |row| {
                Ok(PlaylistInfo {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    track_count: row.get(2)?,
                })
            })
            .context("Cannot query playlists.")?;

        let mut playlists = Vec::new();
        for playlist in rows {
            playlists.push(playlist.context("Queried playlist unwrap failed.")?);
        }

        Ok(playlists)
    }

    /// Tracks of one playlist in stored order; empty for an unknown id.
    pub fn playlist_tracks(&self, playlist_id: i64) -> Result<Vec<TrackRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {TRACK_COLUMNS} FROM playlist_tracks
                 WHERE playlist_id = ?1 ORDER BY position"
            ))
            .context("Invalid SQL statement when SELECTing playlist tracks.")?;

        let rows = stmt
            .query_map([playlist_id], track_from_row)
            .context("Cannot query playlist tracks.")?;

        let mut tracks = Vec::new();
        for track in rows {
            tracks.push(track.context("Queried playlist track unwrap failed.")?);
        }

        Ok(tracks)
    }

    /// Delete a playlist and its tracks. Returns whether one was removed.
    pub fn remove_playlist(&mut self, playlist_id: i64) -> Result<bool> {
        debug!("Removing playlist {playlist_id}");

        let tx = self
            .conn
            .transaction()
            .context("Failed to begin playlist remove transaction.")?;

        let removed = tx
            .execute("DELETE FROM playlists WHERE id = ?1", [playlist_id])
            .context("Failed to DELETE playlist row.")?;

        if removed > 0 {
            tx.execute("DELETE FROM playlist_tracks WHERE playlist_id = ?1", [playlist_id])
                .context("Failed to DELETE playlist tracks.")?;
        }

        tx.commit().context("Committing SQL transaction failed.")?;
        Ok(removed > 0)
    }

    /// Remove the track at 0-based `index` from a playlist, closing the
    /// position gap and refreshing the cached track count. Returns whether
    /// a track was removed.
    pub fn remove_playlist_track(&mut self, playlist_id: i64, index: usize) -> Result<bool> {
        let tx = self
            .conn
            .transaction()
            .context("Failed to begin playlist track remove transaction.")?;

        let removed = tx
            .execute(
                "DELETE FROM playlist_tracks WHERE playlist_id = ?1 AND position = ?2",
                params![playlist_id, index as i64 + 1],
            )
            .context("Failed to DELETE playlist track.")?;

        if removed > 0 {
            // Close the gap left behind and refresh the cached count.
            tx.execute(
                "UPDATE playlist_tracks SET position = position - 1
                 WHERE playlist_id = ?1 AND position > ?2",
                params![playlist_id, index as i64 + 1],
            )
            .context("Failed to renumber playlist tracks.")?;

            tx.execute(
                "UPDATE playlists SET track_count =
                     (SELECT COUNT(*) FROM playlist_tracks WHERE playlist_id = ?1)
                 WHERE id = ?1",
                [playlist_id],
            )
            .context("Failed to update playlist track count.")?;
        }

        tx.commit().context("Committing SQL transaction failed.")?;
        Ok(removed > 0)
    }
}
