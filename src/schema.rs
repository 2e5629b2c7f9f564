//! Database schema creation and versioning.
//!
//! Four tables: `sessions` holds one row per saved playback session (keyed
//! by creation timestamp), `session_tracks` the ordered track list of each
//! session, `playlists`/`playlist_tracks` the user-named saved playlists.
//! `session_tracks` references `sessions` by timestamp and `playlist_tracks`
//! references `playlists` by id; neither relation is enforced by the engine,
//! the store deletes owner and children as one unit instead.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Bumped whenever the table layout changes.
pub const SCHEMA_VERSION: i64 = 1;

/// Create all tables and indexes if they do not exist yet, then stamp the
/// schema version. Safe to call on every open.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS sessions (
            timestamp       INTEGER PRIMARY KEY,
            title           TEXT,
            track_count     INTEGER NOT NULL,
            autosave        INTEGER NOT NULL,
            track_index     INTEGER NOT NULL,
            track_position  INTEGER NOT NULL,
            shuffle_mode    INTEGER NOT NULL,
            repeat_mode     INTEGER NOT NULL
        )",
        (),
    )
    .context("Invalid SQL command when CREATEing sessions TABLE.")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS session_tracks (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            session_timestamp INTEGER NOT NULL,
            sequence          INTEGER NOT NULL,
            title             TEXT,
            artist            TEXT,
            artist_id         INTEGER,
            album             TEXT,
            album_id          INTEGER,
            duration          INTEGER,
            track_number      INTEGER,
            url               TEXT,
            media_id          INTEGER
        )",
        (),
    )
    .context("Invalid SQL command when CREATEing session_tracks TABLE.")?;

    // Session deletion and playlist reads both filter on the owner key.
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_session_tracks_timestamp
         ON session_tracks (session_timestamp)",
        (),
    )
    .context("Failed to create session_tracks index.")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS playlists (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            title       TEXT NOT NULL,
            track_count INTEGER NOT NULL
        )",
        (),
    )
    .context("Invalid SQL command when CREATEing playlists TABLE.")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS playlist_tracks (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            playlist_id  INTEGER NOT NULL,
            position     INTEGER NOT NULL,
            title        TEXT,
            artist       TEXT,
            artist_id    INTEGER,
            album        TEXT,
            album_id     INTEGER,
            duration     INTEGER,
            track_number INTEGER,
            url          TEXT,
            media_id     INTEGER
        )",
        (),
    )
    .context("Invalid SQL command when CREATEing playlist_tracks TABLE.")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_playlist_tracks_playlist
         ON playlist_tracks (playlist_id)",
        (),
    )
    .context("Failed to create playlist_tracks index.")?;

    migrate(conn)
}

/// Stamp or upgrade the stored schema version.
///
/// Version 1 is the first released layout, so there is nothing to upgrade
/// from yet — this is the seam future migrations hang off.
fn migrate(conn: &Connection) -> Result<()> {
    let version: i64 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .context("Failed to read schema version.")?;

    if version < SCHEMA_VERSION {
        log::debug!("Stamping schema version {version} -> {SCHEMA_VERSION}");
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)
            .context("Failed to update schema version.")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_tables_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master
                 WHERE type = 'table' AND name IN
                 ('sessions', 'session_tracks', 'playlists', 'playlist_tracks')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 4);
    }

    #[test]
    fn schema_version_is_stamped() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();

        let version: i64 = conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }
}
