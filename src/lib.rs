//! Playback session persistence for music players.
//!
//! Encore stores ordered track lists tied to timestamped session records in
//! a local SQLite database: auto-saved snapshots (at most one alive at a
//! time), user-named bookmarks (unique by title), and plain saved playlists.
//! Players call into it on backgrounding to snapshot their queue and on
//! startup to restore it.
//!
//! Core modules:
//! - [`store`] - Session save/load/list/remove operations
//! - [`playlist`] - Saved playlist operations
//! - [`schema`] - Table creation and versioning
//! - [`state`] - Playback snapshot model
//! - [`track`] - Track reference model and import helpers
//!
//! ### Supporting Modules
//!
//! - [`config`] - Configuration and data directory management
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation for enhanced UX
//!
//! ## Quick Start Example
//!
//! ```no_run
//! use encore::state::{PlayerState, RepeatMode, ShuffleMode};
//! use encore::store::SessionStore;
//! use encore::track::TrackRecord;
//!
//! let db_path = encore::config::get_db_path()?;
//! let mut store = SessionStore::open(&db_path)?;
//!
//! // Snapshot the current queue as a bookmark.
//! let tracks = vec![TrackRecord {
//!     title: "So What".to_string(),
//!     artist: "Miles Davis".to_string(),
//!     url: "/music/miles/so_what.flac".to_string(),
//!     ..TrackRecord::default()
//! }];
//! let state = PlayerState {
//!     track_index: 0,
//!     track_position_ms: 61_500,
//!     shuffle: ShuffleMode::Off,
//!     repeat: RepeatMode::All,
//! };
//! let timestamp = store.save_state(&tracks, &state, "Evening session", false)?;
//!
//! // Restore on startup: most recent session of either kind.
//! let restored = store.state(None)?;
//! let queue = store.read_playlist(None)?;
//! println!("resuming track {} of {}", restored.track_index, queue.len());
//!
//! // The bookmark listing never contains auto-saves.
//! for bookmark in store.bookmarks()? {
//!     println!("{} ({} tracks)", bookmark.title, bookmark.track_count);
//! }
//! store.remove_state(timestamp)?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! All public functions return `Result<T, anyhow::Error>`. "Not found" is
//! not an error: state lookups return a sentinel (`track_index = -1`),
//! track-list lookups an empty list. Storage failures propagate with
//! context and are never retried.

pub mod cli;
pub mod completion;
pub mod config;
pub mod playlist;
pub mod schema;
pub mod state;
pub mod store;
pub mod track;
