//! Session store: persistence for playback snapshots and bookmarks.
//!
//! A session pairs an ordered track list with a [`PlayerState`] under a
//! creation timestamp. Two kinds exist: auto-saves (at most one alive at a
//! time, written by the player on backgrounding) and bookmarks (user-named,
//! unlimited, unique by title). Supersession is enforced proactively: every
//! save deletes whatever it replaces inside the same transaction that writes
//! the new rows, so a crash can never leave a session without its tracks.
//!
//! Lookups that match nothing return sentinels — the default
//! [`PlayerState`] or an empty track list — never an error.

use crate::schema;
use crate::state::{PlayerState, RepeatMode, ShuffleMode};
use crate::track::TrackRecord;
use anyhow::{Context, Result};
use log::{debug, trace};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction};
use serde::Serialize;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Column list shared by `session_tracks` and `playlist_tracks` reads;
/// must stay in sync with [`track_from_row`].
pub(crate) const TRACK_COLUMNS: &str =
    "title, artist, artist_id, album, album_id, duration, track_number, url, media_id";

/// Listing projection of one bookmark (a non-auto-saved session).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Bookmark {
    /// Creation time in milliseconds since epoch; identifies the session.
    pub timestamp: i64,
    pub title: String,
    pub track_count: i64,
}

/// Handle to the session database. One `rusqlite::Connection`, no cache,
/// no locking beyond SQLite's own; every operation is synchronous.
pub struct SessionStore {
    pub(crate) conn: Connection,
}

impl SessionStore {
    /// Open (or create) the session database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open session database at {}", path.display()))?;

        schema::create_tables(&conn)?;
        Ok(Self { conn })
    }

    /// Open a fresh in-memory store. Used by tests and benchmarks.
    pub fn open_in_memory() -> Result<Self> {
        let conn =
            Connection::open_in_memory().context("Failed to open in-memory session database.")?;

        schema::create_tables(&conn)?;
        Ok(Self { conn })
    }

    /// Save a playback session, superseding whatever it replaces.
    ///
    /// An auto-save (`autosave = true`) first removes every existing
    /// auto-saved session; a named save removes any session carrying the
    /// same title. The deletes, the session row, and the track list all
    /// land in one transaction.
    ///
    /// Returns the timestamp assigned to the new session.
    pub fn save_state(
        &mut self,
        tracks: &[TrackRecord],
        state: &PlayerState,
        title: &str,
        autosave: bool,
    ) -> Result<i64> {
        debug!(
            "Saving {} session '{title}' with {} tracks",
            if autosave { "auto" } else { "named" },
            tracks.len()
        );

        let tx = self
            .conn
            .transaction()
            .context("Failed to begin save transaction.")?;

        let stale: Vec<i64> = if autosave {
            Self::session_timestamps(&tx, "autosave = 1", params![])?
        } else {
            Self::session_timestamps(&tx, "autosave = 0 AND title = ?1", params![title])?
        };

        for timestamp in stale {
            trace!("Superseding session {timestamp}");
            Self::delete_session_tx(&tx, timestamp)?;
        }

        let timestamp = next_timestamp(&tx)?;

        tx.execute(
            "INSERT INTO sessions (timestamp, title, track_count, autosave,
                                   track_index, track_position, shuffle_mode, repeat_mode)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                timestamp,
                title,
                tracks.len() as i64,
                autosave,
                state.track_index,
                state.track_position_ms,
                state.shuffle.code(),
                state.repeat.code(),
            ],
        )
        .context("Invalid SQL statement when INSERTing session row.")?;

        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO session_tracks
                     (session_timestamp, sequence, title, artist, artist_id, album,
                      album_id, duration, track_number, url, media_id)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                )
                .context("Invalid SQL statement when INSERTing session tracks.")?;

            for (sequence, track) in tracks.iter().enumerate() {
                stmt.execute(params![
                    timestamp,
                    sequence as i64,
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
                .with_context(|| {
                    format!("Failed to INSERT session track #{sequence}: {track:?}")
                })?;
            }
        }

        tx.commit().context("Committing SQL transaction failed.")?;
        Ok(timestamp)
    }

    /// Read a saved playback snapshot.
    ///
    /// `None` resolves to the most recent session of either kind; a
    /// timestamp resolves to exactly that session. When nothing matches,
    /// the sentinel default state comes back (`track_index = -1`).
    pub fn state(&self, timestamp: Option<i64>) -> Result<PlayerState> {
        let row = match timestamp {
            Some(timestamp) => self
                .conn
                .query_row(
                    "SELECT track_index, track_position, shuffle_mode, repeat_mode
                     FROM sessions WHERE timestamp = ?1",
                    [timestamp],
                    state_from_row,
                )
                .optional(),
            None => self
                .conn
                .query_row(
                    "SELECT track_index, track_position, shuffle_mode, repeat_mode
                     FROM sessions ORDER BY timestamp DESC LIMIT 1",
                    [],
                    state_from_row,
                )
                .optional(),
        }
        .context("Failed to query session state.")?;

        Ok(row.unwrap_or_default())
    }

    /// Read a session's track list in original save order.
    ///
    /// `None` resolves to the most recent session. An unknown timestamp —
    /// or an empty database — yields an empty list.
    pub fn read_playlist(&self, timestamp: Option<i64>) -> Result<Vec<TrackRecord>> {
        let timestamp = match timestamp {
            Some(timestamp) => Some(timestamp),
            None => self.newest_timestamp()?,
        };

        let Some(timestamp) = timestamp else {
            return Ok(Vec::new());
        };

        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {TRACK_COLUMNS} FROM session_tracks
                 WHERE session_timestamp = ?1 ORDER BY sequence"
            ))
            .context("Invalid SQL statement when SELECTing session tracks.")?;

        let rows = stmt
            .query_map([timestamp], track_from_row)
            .context("Cannot query session tracks.")?;

        let mut tracks = Vec::new();
        for track in rows {
            tracks.push(track.context("Queried session track unwrap failed.")?);
        }

        trace!("Read {} tracks for session {timestamp}", tracks.len());
        Ok(tracks)
    }

    /// All bookmarks, newest first. Auto-saves are never included.
    pub fn bookmarks(&self) -> Result<Vec<Bookmark>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT timestamp, title, track_count FROM sessions
                 WHERE autosave = 0 ORDER BY timestamp DESC",
            )
            .context("Invalid SQL statement when SELECTing bookmarks.")?;

        let rows = stmt
            .query_map([], |row| {
                Ok(Bookmark {
                    timestamp: row.get(0)?,
                    title: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    track_count: row.get(2)?,
                })
            })
            .context("Cannot query bookmarks.")?;

        let mut bookmarks = Vec::new();
        for bookmark in rows {
            bookmarks.push(bookmark.context("Queried bookmark unwrap failed.")?);
        }

        Ok(bookmarks)
    }

    /// Delete the session with the given timestamp and all its tracks.
    /// Succeeds silently when the timestamp does not exist.
    pub fn remove_state(&mut self, timestamp: i64) -> Result<()> {
        debug!("Removing session {timestamp}");

        let tx = self
            .conn
            .transaction()
            .context("Failed to begin remove transaction.")?;

        Self::delete_session_tx(&tx, timestamp)?;

        tx.commit().context("Committing SQL transaction failed.")?;
        Ok(())
    }

    /// Timestamp of the most recent session, if any session exists.
    fn newest_timestamp(&self) -> Result<Option<i64>> {
        self.conn
            .query_row(
                "SELECT timestamp FROM sessions ORDER BY timestamp DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()
            .context("Failed to query newest session timestamp.")
    }

    /// Session timestamps matching a filter, inside a transaction.
    fn session_timestamps(
        tx: &Transaction<'_>,
        filter: &str,
        filter_params: impl rusqlite::Params,
    ) -> Result<Vec<i64>> {
        let mut stmt = tx
            .prepare(&format!("SELECT timestamp FROM sessions WHERE {filter}"))
            .context("Invalid SQL statement when SELECTing session timestamps.")?;

        let rows = stmt
            .query_map(filter_params, |row| row.get(0))
            .context("Cannot query session timestamps.")?;

        let mut timestamps = Vec::new();
        for timestamp in rows {
            timestamps.push(timestamp.context("Queried timestamp unwrap failed.")?);
        }

        Ok(timestamps)
    }

    /// Delete a session row and its tracks as one unit.
    fn delete_session_tx(tx: &Transaction<'_>, timestamp: i64) -> Result<()> {
        tx.execute(
            "DELETE FROM session_tracks WHERE session_timestamp = ?1",
            [timestamp],
        )
        .context("Failed to DELETE session tracks.")?;

        tx.execute("DELETE FROM sessions WHERE timestamp = ?1", [timestamp])
            .context("Failed to DELETE session row.")?;

        Ok(())
    }
}

/// Map a `session_tracks`/`playlist_tracks` row ([`TRACK_COLUMNS`] order)
/// to a [`TrackRecord`].
pub(crate) fn track_from_row(row: &Row<'_>) -> rusqlite::Result<TrackRecord> {
    Ok(TrackRecord {
        title: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
        artist: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        artist_id: row.get::<_, Option<i64>>(2)?.unwrap_or_default(),
        album: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        album_id: row.get::<_, Option<i64>>(4)?.unwrap_or_default(),
        duration_ms: row.get::<_, Option<i64>>(5)?.unwrap_or_default(),
        track_number: row.get::<_, Option<i64>>(6)?.unwrap_or_default(),
        url: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
        media_id: row.get::<_, Option<i64>>(8)?.unwrap_or_default(),
    })
}

fn state_from_row(row: &Row<'_>) -> rusqlite::Result<PlayerState> {
    Ok(PlayerState {
        track_index: row.get(0)?,
        track_position_ms: row.get(1)?,
        shuffle: ShuffleMode::from_code(row.get(2)?),
        repeat: RepeatMode::from_code(row.get(3)?),
    })
}

/// Pick the timestamp for a new session.
///
/// Normally the wall clock in milliseconds; when a save lands inside the
/// same millisecond as the newest stored session the clock value would
/// collide on the primary key, so step past the newest row instead.
fn next_timestamp(tx: &Transaction<'_>) -> Result<i64> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("System clock is before the epoch.")?;
    let now = i64::try_from(now.as_millis()).context("System clock is out of range.")?;

    let newest: i64 = tx
        .query_row("SELECT COALESCE(MAX(timestamp), 0) FROM sessions", [], |row| {
            row.get(0)
        })
        .context("Failed to query newest timestamp.")?;

    Ok(now.max(newest + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(title: &str) -> TrackRecord {
        TrackRecord {
            title: title.to_string(),
            artist: "Test Artist".to_string(),
            album: "Test Album".to_string(),
            duration_ms: 180_000,
            url: format!("/music/{title}.flac"),
            ..TrackRecord::default()
        }
    }

    fn playing_state(index: i64) -> PlayerState {
        PlayerState {
            track_index: index,
            track_position_ms: 42_000,
            shuffle: ShuffleMode::On,
            repeat: RepeatMode::All,
        }
    }

    #[test]
    fn save_and_read_round_trip_preserves_order() {
        let mut store = SessionStore::open_in_memory().unwrap();
        let tracks = vec![track("one"), track("two"), track("three")];

        let timestamp = store
            .save_state(&tracks, &playing_state(1), "evening", false)
            .unwrap();

        let restored = store.read_playlist(Some(timestamp)).unwrap();
        assert_eq!(restored, tracks);

        let state = store.state(Some(timestamp)).unwrap();
        assert_eq!(state, playing_state(1));
    }

    #[test]
    fn same_title_save_replaces_previous_session() {
        let mut store = SessionStore::open_in_memory().unwrap();

        let first = store
            .save_state(&[track("a")], &playing_state(0), "road trip", false)
            .unwrap();
        let second = store
            .save_state(
                &[track("b"), track("c")],
                &playing_state(1),
                "road trip",
                false,
            )
            .unwrap();

        // The superseded timestamp must no longer resolve.
        assert!(store.state(Some(first)).unwrap().is_sentinel());
        assert!(store.read_playlist(Some(first)).unwrap().is_empty());

        let bookmarks = store.bookmarks().unwrap();
        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].timestamp, second);
        assert_eq!(bookmarks[0].track_count, 2);
    }

    #[test]
    fn at_most_one_autosave_survives() {
        let mut store = SessionStore::open_in_memory().unwrap();

        store
            .save_state(&[track("a")], &playing_state(0), "auto", true)
            .unwrap();
        let second = store
            .save_state(&[track("b"), track("c")], &playing_state(1), "auto", true)
            .unwrap();

        let playlist = store.read_playlist(None).unwrap();
        assert_eq!(playlist.len(), 2);
        assert_eq!(playlist[0].title, "b");

        // Exactly one session remains and it is the second autosave.
        assert_eq!(store.state(None).unwrap(), playing_state(1));
        assert_eq!(store.read_playlist(Some(second)).unwrap().len(), 2);
        assert!(store.bookmarks().unwrap().is_empty());
    }

    #[test]
    fn autosave_does_not_touch_bookmarks() {
        let mut store = SessionStore::open_in_memory().unwrap();

        let bookmark = store
            .save_state(&[track("a")], &playing_state(0), "keeper", false)
            .unwrap();
        store
            .save_state(&[track("b")], &playing_state(1), "auto", true)
            .unwrap();
        store
            .save_state(&[track("c")], &playing_state(2), "auto", true)
            .unwrap();

        assert_eq!(store.read_playlist(Some(bookmark)).unwrap().len(), 1);
        assert_eq!(store.bookmarks().unwrap().len(), 1);
    }

    #[test]
    fn latest_state_spans_bookmarks_and_autosaves() {
        let mut store = SessionStore::open_in_memory().unwrap();

        store
            .save_state(&[track("a")], &playing_state(0), "named", false)
            .unwrap();
        store
            .save_state(&[track("b")], &playing_state(1), "auto", true)
            .unwrap();

        // The autosave is newer, so it wins the no-argument lookup.
        assert_eq!(store.state(None).unwrap(), playing_state(1));

        store
            .save_state(&[track("c")], &playing_state(2), "newer", false)
            .unwrap();
        assert_eq!(store.state(None).unwrap(), playing_state(2));
    }

    #[test]
    fn bookmarks_sorted_newest_first() {
        let mut store = SessionStore::open_in_memory().unwrap();

        for title in ["first", "second", "third"] {
            store
                .save_state(&[track(title)], &playing_state(0), title, false)
                .unwrap();
        }

        let bookmarks = store.bookmarks().unwrap();
        let titles: Vec<&str> = bookmarks.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, ["third", "second", "first"]);
        assert!(bookmarks.windows(2).all(|w| w[0].timestamp > w[1].timestamp));
    }

    #[test]
    fn remove_state_yields_sentinel_and_empty_playlist() {
        let mut store = SessionStore::open_in_memory().unwrap();

        let timestamp = store
            .save_state(&[track("a"), track("b")], &playing_state(1), "gone", false)
            .unwrap();
        store.remove_state(timestamp).unwrap();

        assert!(store.state(Some(timestamp)).unwrap().is_sentinel());
        assert!(store.read_playlist(Some(timestamp)).unwrap().is_empty());
        assert!(store.bookmarks().unwrap().is_empty());
    }

    #[test]
    fn remove_unknown_timestamp_is_a_no_op() {
        let mut store = SessionStore::open_in_memory().unwrap();
        store.remove_state(123_456).unwrap();

        store
            .save_state(&[track("a")], &playing_state(0), "still here", false)
            .unwrap();
        store.remove_state(1).unwrap();
        assert_eq!(store.bookmarks().unwrap().len(), 1);
    }

    #[test]
    fn empty_store_returns_sentinels() {
        let store = SessionStore::open_in_memory().unwrap();
        assert!(store.state(None).unwrap().is_sentinel());
        assert!(store.read_playlist(None).unwrap().is_empty());
        assert!(store.bookmarks().unwrap().is_empty());
    }

    #[test]
    fn rapid_saves_get_distinct_increasing_timestamps() {
        let mut store = SessionStore::open_in_memory().unwrap();

        let mut timestamps = Vec::new();
        for i in 0..5 {
            let timestamp = store
                .save_state(&[track("t")], &playing_state(0), &format!("b{i}"), false)
                .unwrap();
            timestamps.push(timestamp);
        }

        assert!(timestamps.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(store.bookmarks().unwrap().len(), 5);
    }

    #[test]
    fn empty_track_list_saves_cleanly() {
        let mut store = SessionStore::open_in_memory().unwrap();

        let timestamp = store
            .save_state(&[], &PlayerState::default(), "empty", false)
            .unwrap();

        assert!(store.read_playlist(Some(timestamp)).unwrap().is_empty());
        assert_eq!(store.bookmarks().unwrap()[0].track_count, 0);
    }
}
