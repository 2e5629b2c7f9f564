//! # Command-Line Interface Module
//!
//! This module defines the command-line interface for Encore using Clap
//! derive macros. It provides a type-safe way to parse command-line
//! arguments and route them to appropriate functionality.
//!
//! ## Commands
//!
//! - `save`: Save a bookmark (named playback session)
//! - `autosave`: Save an auto-save snapshot, superseding the previous one
//! - `bookmarks`: List saved bookmarks, newest first
//! - `resume`: Print a saved state and its track list
//! - `remove`: Delete a saved session
//! - `playlist`: Manage saved playlists
//!
//! ## Examples
//!
//! ```bash
//! encore save "Road trip" --tracks queue.json --index 3 --position 61500
//! encore bookmarks
//! encore resume --title "Road trip"
//! ```

use crate::state::{RepeatMode, ShuffleMode};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Main application arguments structure.
///
/// Uses Clap derive macros to automatically generate argument parsing,
/// help text, and validation. The main structure contains only a subcommand
/// and a global database override since all functionality is accessed
/// through specific commands.
#[derive(Parser)]
#[command(name = "encore")]
#[command(about = "Encore: saved playback sessions, bookmarks & playlists for music players")]
#[command(version)]
pub struct Args {
    /// Path to the session database
    ///
    /// Overrides the platform-standard location. Useful for testing and
    /// for players that keep their state alongside the music library.
    #[arg(long, global = true, env = "ENCORE_DB")]
    pub database: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Arguments shared by every command that writes a track list.
#[derive(clap::Args)]
pub struct TrackListArgs {
    /// JSON file containing the track list
    ///
    /// An array of track objects; missing fields default, so a bare
    /// `[{"url": "..."}]` list is accepted.
    #[arg(long, value_name = "FILE", conflicts_with = "files")]
    pub tracks: Option<PathBuf>,

    /// Build the track list from media file paths instead
    ///
    /// Paths are absolutized before they are stored so the session stays
    /// valid regardless of the working directory at restore time.
    #[arg(long, value_name = "PATH", num_args = 1..)]
    pub files: Vec<PathBuf>,
}

/// Arguments shared by `save` and `autosave` describing the snapshot.
#[derive(clap::Args)]
pub struct SnapshotArgs {
    /// Index of the playing track within the list (-1 = none)
    #[arg(long, default_value_t = -1)]
    pub index: i64,

    /// Playback offset within the current track, in milliseconds
    #[arg(long, default_value_t = -1)]
    pub position: i64,

    /// Shuffle mode at save time
    #[arg(long, value_enum, default_value_t = ShuffleMode::Off)]
    pub shuffle: ShuffleMode,

    /// Repeat mode at save time
    #[arg(long, value_enum, default_value_t = RepeatMode::Off)]
    pub repeat: RepeatMode,
}

/// Enumeration of all available subcommands.
///
/// Each variant corresponds to a major piece of functionality in Encore.
/// Command arguments are embedded directly in the enum variants for
/// type safety and automatic validation.
#[derive(Subcommand)]
pub enum Command {
    /// Save a bookmark (named playback session)
    ///
    /// Stores the track list together with the playback snapshot under the
    /// given title. Saving under an existing title replaces that bookmark
    /// and its track list.
    Save {
        /// Title of the bookmark
        title: String,

        #[command(flatten)]
        tracks: TrackListArgs,

        #[command(flatten)]
        snapshot: SnapshotArgs,
    },

    /// Save an auto-save snapshot
    ///
    /// Auto-saves are the player's own periodic/backgrounding snapshots.
    /// At most one exists at a time: each autosave supersedes the last.
    Autosave {
        #[command(flatten)]
        tracks: TrackListArgs,

        #[command(flatten)]
        snapshot: SnapshotArgs,
    },

    /// List saved bookmarks, newest first
    ///
    /// Auto-saves are never included in this listing.
    Bookmarks {
        /// Emit machine-readable JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print a saved state and its track list
    ///
    /// Without arguments, resolves the most recent session of either kind —
    /// the player's restore-on-resume flow. A timestamp or bookmark title
    /// selects a specific session. When nothing matches, the sentinel state
    /// (index -1) and an empty track list are printed rather than failing.
    Resume {
        /// Timestamp identifying the session
        #[arg(long, conflicts_with = "title")]
        timestamp: Option<i64>,

        /// Bookmark title identifying the session
        #[arg(long)]
        title: Option<String>,

        /// Emit machine-readable JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Delete a saved session
    ///
    /// Removes the session and its track list as one unit. Removing a
    /// timestamp that does not exist is not an error.
    Remove {
        /// Timestamp identifying the session
        #[arg(long, conflicts_with = "title", required_unless_present = "title")]
        timestamp: Option<i64>,

        /// Bookmark title identifying the session
        #[arg(long)]
        title: Option<String>,
    },

    /// Manage saved playlists
    ///
    /// Playlists are named track lists without a playback snapshot.
    /// Titles are unique; saving under an existing title replaces it.
    Playlist {
        #[command(subcommand)]
        action: PlaylistAction,
    },

    /// Generate shell completions
    ///
    /// Usage: encore completion bash > ~/.local/share/bash-completion/completions/encore
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },

    /// Generate enhanced completion with bookmark title completion
    ///
    /// Generates an enhanced completion script that completes bookmark
    /// titles for the resume and remove commands.
    ///
    /// Usage: encore completion-enhanced fish > ~/.config/fish/completions/encore.fish
    CompletionEnhanced {
        /// Shell to generate enhanced completions for (bash and fish supported)
        shell: Shell,
    },

    /// List bookmark titles for completion (hidden command)
    #[command(hide = true)]
    CompleteBookmarks,
}

/// Saved playlist management actions
#[derive(Subcommand)]
pub enum PlaylistAction {
    /// Save a track list under a title, replacing any existing one
    Save {
        /// Title of the playlist
        title: String,

        #[command(flatten)]
        tracks: TrackListArgs,
    },

    /// List saved playlists
    List {
        /// Emit machine-readable JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the tracks of one playlist
    Show {
        /// Playlist id as printed by `playlist list`
        id: i64,

        /// Emit machine-readable JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Delete a playlist and its tracks
    Remove {
        /// Playlist id as printed by `playlist list`
        id: i64,
    },

    /// Remove one track from a playlist
    RemoveTrack {
        /// Playlist id as printed by `playlist list`
        id: i64,

        /// 0-based index of the track to remove
        index: usize,
    },
}
