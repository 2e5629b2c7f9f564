//! # Encore - Playback Session Persistence
//!
//! Encore saves and restores playback sessions for music players: bookmarks,
//! auto-save snapshots and named playlists, all in a local SQLite database.
//! The CLI wraps the library for players that shell out for persistence and
//! for inspecting the database by hand.
//!
//! ## Usage
//!
//! ```bash
//! # Save the current queue as a bookmark
//! encore save "Road trip" --tracks queue.json --index 3 --position 61500
//!
//! # Snapshot on backgrounding (supersedes the previous autosave)
//! encore autosave --tracks queue.json --index 3 --position 61500
//!
//! # List bookmarks and restore
//! encore bookmarks
//! encore resume --title "Road trip"
//! ```

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use log::{debug, info};
use serde::Serialize;
use std::path::PathBuf;

use encore::cli;
use encore::completion;
use encore::config;
use encore::state::PlayerState;
use encore::store::SessionStore;
use encore::track::{self, TrackRecord};

/// Machine-readable shape of `resume --json`.
#[derive(Serialize)]
struct ResumeOutput {
    timestamp: Option<i64>,
    state: PlayerState,
    tracks: Vec<TrackRecord>,
}

/// Open the session store, honoring the `--database` override.
fn open_store(database: Option<PathBuf>) -> Result<SessionStore> {
    let db_path = match database {
        Some(path) => path,
        None => config::get_db_path()?,
    };
    debug!("Opening session database at {}", db_path.display());
    SessionStore::open(&db_path)
}

/// Materialize the track list from whichever input the user gave.
fn collect_tracks(args: &cli::TrackListArgs) -> Result<Vec<TrackRecord>> {
    if let Some(path) = &args.tracks {
        track::load_tracks(path)
    } else if !args.files.is_empty() {
        track::tracks_from_paths(&args.files)
    } else {
        anyhow::bail!("No track list given. Use --tracks <FILE> or --files <PATH>...")
    }
}

/// Resolve the session a user pointed at, by timestamp or bookmark title.
/// `None` means "most recent" and is passed through.
fn resolve_timestamp(
    store: &SessionStore,
    timestamp: Option<i64>,
    title: Option<&str>,
) -> Result<Option<i64>> {
    if timestamp.is_some() {
        return Ok(timestamp);
    }

    if let Some(title) = title {
        let bookmark = store
            .bookmarks()?
            .into_iter()
            .find(|bookmark| bookmark.title == title)
            .with_context(|| format!("No bookmark titled '{title}'"))?;
        return Ok(Some(bookmark.timestamp));
    }

    Ok(None)
}

fn snapshot_to_state(snapshot: &cli::SnapshotArgs) -> PlayerState {
    PlayerState {
        track_index: snapshot.index,
        track_position_ms: snapshot.position,
        shuffle: snapshot.shuffle,
        repeat: snapshot.repeat,
    }
}

/// Main entry point for the Encore application.
///
/// Initializes logging, parses command-line arguments, and routes commands
/// to the appropriate module functions.
///
/// # Logging
///
/// Initializes environment logger which can be controlled via `RUST_LOG`:
/// - `RUST_LOG=debug encore bookmarks` - Enable debug logging
/// - `RUST_LOG=encore::store=trace encore resume` - Module-specific logging
fn main() -> Result<()> {
    // Initialize environment logger for debugging and monitoring
    env_logger::init();

    // Parse command-line arguments using Clap derive macros
    let args = cli::Args::parse();

    // Route commands to appropriate module functions
    match args.command {
        cli::Command::Save {
            title,
            tracks,
            snapshot,
        } => {
            let mut store = open_store(args.database)?;
            let track_list = collect_tracks(&tracks)?;
            let state = snapshot_to_state(&snapshot);

            info!("Saving bookmark '{title}' with {} tracks", track_list.len());
            let timestamp = store.save_state(&track_list, &state, &title, false)?;
            println!("Saved bookmark '{title}' ({} tracks) as {timestamp}", track_list.len());
        }
        cli::Command::Autosave { tracks, snapshot } => {
            let mut store = open_store(args.database)?;
            let track_list = collect_tracks(&tracks)?;
            let state = snapshot_to_state(&snapshot);

            info!("Saving autosave snapshot with {} tracks", track_list.len());
            let timestamp = store.save_state(&track_list, &state, "auto", true)?;
            println!("Saved autosave ({} tracks) as {timestamp}", track_list.len());
        }
        cli::Command::Bookmarks { json } => {
            let store = open_store(args.database)?;
            let bookmarks = store.bookmarks()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&bookmarks)?);
            } else if bookmarks.is_empty() {
                println!("No bookmarks saved.");
            } else {
                for bookmark in bookmarks {
                    println!(
                        "{:>15}  {} ({} tracks)",
                        bookmark.timestamp, bookmark.title, bookmark.track_count
                    );
                }
            }
        }
        cli::Command::Resume {
            timestamp,
            title,
            json,
        } => {
            let store = open_store(args.database)?;
            let timestamp = resolve_timestamp(&store, timestamp, title.as_deref())?;

            let state = store.state(timestamp)?;
            let tracks = store.read_playlist(timestamp)?;

            if json {
                let output = ResumeOutput {
                    timestamp,
                    state,
                    tracks,
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else if state.is_sentinel() && tracks.is_empty() {
                println!("Nothing to resume.");
            } else {
                println!(
                    "track {} at {} ms, shuffle {:?}, repeat {:?}",
                    state.track_index, state.track_position_ms, state.shuffle, state.repeat
                );
                for (index, track) in tracks.iter().enumerate() {
                    let marker = if index as i64 == state.track_index {
                        '>'
                    } else {
                        ' '
                    };
                    println!("{marker} {:>3}. {} - {}", index, track.artist, track.title);
                }
            }
        }
        cli::Command::Remove { timestamp, title } => {
            let mut store = open_store(args.database)?;
            let timestamp = resolve_timestamp(&store, timestamp, title.as_deref())?
                .context("Give --timestamp or --title to pick the session to remove.")?;

            store.remove_state(timestamp)?;
            println!("Removed session {timestamp}");
        }
        cli::Command::Playlist { action } => match action {
            cli::PlaylistAction::Save { title, tracks } => {
                let mut store = open_store(args.database)?;
                let track_list = collect_tracks(&tracks)?;

                info!("Saving playlist '{title}' with {} tracks", track_list.len());
                let id = store.save_playlist(&title, &track_list)?;
                println!("Saved playlist '{title}' ({} tracks) as #{id}", track_list.len());
            }
            cli::PlaylistAction::List { json } => {
                let store = open_store(args.database)?;
                let playlists = store.playlists()?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&playlists)?);
                } else if playlists.is_empty() {
                    println!("No playlists saved.");
                } else {
                    for playlist in playlists {
                        println!(
                            "{:>5}  {} ({} tracks)",
                            playlist.id, playlist.title, playlist.track_count
                        );
                    }
                }
            }
            cli::PlaylistAction::Show { id, json } => {
                let store = open_store(args.database)?;
                let tracks = store.playlist_tracks(id)?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&tracks)?);
                } else if tracks.is_empty() {
                    println!("Playlist #{id} has no tracks.");
                } else {
                    for (index, track) in tracks.iter().enumerate() {
                        println!("{:>3}. {} - {}", index, track.artist, track.title);
                    }
                }
            }
            cli::PlaylistAction::Remove { id } => {
                let mut store = open_store(args.database)?;
                if store.remove_playlist(id)? {
                    println!("Removed playlist #{id}");
                } else {
                    println!("No playlist #{id}");
                }
            }
            cli::PlaylistAction::RemoveTrack { id, index } => {
                let mut store = open_store(args.database)?;
                if store.remove_playlist_track(id, index)? {
                    println!("Removed track {index} from playlist #{id}");
                } else {
                    println!("No track {index} in playlist #{id}");
                }
            }
        },
        cli::Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            completion::generate_completions(completion::shell_to_completion_shell(&shell), &mut cmd);
        }
        cli::Command::CompletionEnhanced { shell } => match shell {
            cli::Shell::Bash => completion::generate_enhanced_bash_completion(),
            cli::Shell::Fish => completion::generate_enhanced_fish_completion(),
            _ => {
                return Err(anyhow::anyhow!(
                    "Enhanced completions only supported for bash and fish"
                ))
            }
        },
        cli::Command::CompleteBookmarks => {
            // This is used by shell completion scripts to get bookmark titles
            completion::print_bookmark_completions()?;
        }
    }

    Ok(())
}
