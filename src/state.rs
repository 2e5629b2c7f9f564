//! Playback snapshot model.
//!
//! A [`PlayerState`] captures where playback stood when a session was saved:
//! the index of the active track inside the session's track list, the offset
//! within that track, and the shuffle/repeat modes. The default value is the
//! sentinel state returned for lookups that match nothing — callers must
//! treat an index of `-1` as "absent" rather than expecting an error.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Shuffle mode of the player at save time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ShuffleMode {
    #[default]
    Off,
    On,
}

/// Repeat mode of the player at save time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    #[default]
    Off,
    /// Repeat the whole track list.
    All,
    /// Repeat the current track.
    Track,
}

impl ShuffleMode {
    /// Stable integer code used in the database.
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Self::Off => 0,
            Self::On => 1,
        }
    }

    /// Decode a stored code. Unknown values fall back to `Off`.
    #[must_use]
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::On,
            _ => Self::Off,
        }
    }
}

impl RepeatMode {
    /// Stable integer code used in the database.
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Self::Off => 0,
            Self::All => 1,
            Self::Track => 2,
        }
    }

    /// Decode a stored code. Unknown values fall back to `Off`.
    #[must_use]
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::All,
            2 => Self::Track,
            _ => Self::Off,
        }
    }
}

/// One playback snapshot, as stored alongside a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Index of the playing track within the session's track list.
    /// `-1` when no session matched the lookup.
    pub track_index: i64,
    /// Playback offset within the current track, in milliseconds.
    /// `-1` when no session matched the lookup.
    pub track_position_ms: i64,
    pub shuffle: ShuffleMode,
    pub repeat: RepeatMode,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            track_index: -1,
            track_position_ms: -1,
            shuffle: ShuffleMode::Off,
            repeat: RepeatMode::Off,
        }
    }
}

impl PlayerState {
    /// Whether this is the sentinel "nothing saved" state.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.track_index < 0
    }
}
