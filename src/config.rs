//! # Configuration Module
//!
//! This module handles configuration management and data directory setup for
//! Encore. It provides platform-appropriate data storage locations and
//! ensures necessary directories exist.
//!
//! ## Data Storage
//!
//! Encore stores its database in the platform-standard data directory:
//! - Linux: `~/.local/share/encore/`
//! - macOS: `~/Library/Application Support/encore/`
//! - Windows: `%APPDATA%\encore\`

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Returns the platform-appropriate database file path.
///
/// Locates the standard data directory for the current platform and creates
/// the `encore` subdirectory if it doesn't exist. The database file is named
/// `sessions.db` and stores all saved sessions, bookmarks and playlists.
///
/// # Errors
///
/// This function will return an error if:
/// - The system data directory cannot be determined
/// - The encore subdirectory cannot be created due to permissions
/// - The filesystem is read-only
pub fn get_db_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join("sessions.db"))
}

/// Returns the platform-appropriate data directory for Encore.
///
/// Similar to `get_db_path` but returns the directory itself rather than the
/// database file path.
pub fn get_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine system data directory. Please ensure your platform supports standard data directories."
        )
    })?;

    let encore_dir = data_dir.join("encore");
    fs::create_dir_all(&encore_dir).with_context(|| {
        format!(
            "Failed to create Encore data directory at {}. Please check file permissions.",
            encore_dir.display()
        )
    })?;

    Ok(encore_dir)
}

/// Configuration for runtime behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Path to the database file
    pub db_path: PathBuf,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            db_path: get_db_path().unwrap_or_else(|_| PathBuf::from("sessions.db")),
        }
    }
}

impl RuntimeConfig {
    /// Create a new runtime configuration
    pub fn new() -> Result<Self> {
        Ok(Self {
            db_path: get_db_path()?,
        })
    }

    /// Create configuration with explicit database path
    #[must_use]
    pub fn with_db_path(db_path: PathBuf) -> Self {
        Self { db_path }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_db_path_returns_valid_path() {
        let result = get_db_path();
        assert!(result.is_ok());

        let path = result.unwrap();
        assert!(path.file_name().is_some());
        assert_eq!(path.file_name().unwrap(), "sessions.db");
        assert!(path.parent().is_some());
    }

    #[test]
    fn test_get_db_path_creates_directory() {
        let path = get_db_path().unwrap();
        let parent_dir = path.parent().expect("Database path should have parent");

        // Directory should exist after calling get_db_path
        assert!(parent_dir.exists());
        assert!(parent_dir.is_dir());
    }

    #[test]
    fn test_get_db_path_consistent_results() {
        let path1 = get_db_path().expect("First call should succeed");
        let path2 = get_db_path().expect("Second call should succeed");

        assert_eq!(path1, path2);
    }

    #[test]
    fn test_db_path_structure() {
        let path = get_db_path().expect("Should get valid path");

        assert!(path.to_string_lossy().contains("encore"));
        assert!(path.to_string_lossy().ends_with("sessions.db"));

        let parent = path.parent().expect("Should have parent directory");
        assert_eq!(parent.file_name().unwrap(), "encore");
    }

    #[test]
    fn test_runtime_config_with_explicit_path() {
        let config = RuntimeConfig::with_db_path(PathBuf::from("/tmp/test.db"));
        assert_eq!(config.db_path, PathBuf::from("/tmp/test.db"));
    }
}
