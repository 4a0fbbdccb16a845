//! Configuration management for the Bardo backend.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Only deployment details live here (bind address,
//! static asset directory, playlist page limit). The playlist identifier and the
//! watch URL prefix are fixed constants in [`crate::api`].
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, path::PathBuf};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8000";
pub const DEFAULT_STATIC_DIR: &str = "./client/dist";
pub const DEFAULT_PLAYLIST_TRACK_LIMIT: usize = 100;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `bardo/.env`. Every setting has a default, so a
/// missing file is not an error.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/bardo/.env`
/// - macOS: `~/Library/Application Support/bardo/.env`
/// - Windows: `%LOCALAPPDATA%/bardo/.env`
///
/// # Errors
///
/// This function will return an error if:
/// - The parent directory cannot be created
/// - The `.env` file exists but cannot be read or parsed
pub async fn load_env() -> Result<(), String> {
    let path = env_file_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Location of the `.env` file read by [`load_env`].
pub fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("bardo/.env");
    path
}

/// Returns the address the HTTP server binds to.
///
/// Reads `SERVER_ADDRESS`, falling back to `127.0.0.1:8000`, which is the
/// origin the bundled web client talks to.
///
/// # Example
///
/// ```
/// let addr = server_addr(); // e.g., "127.0.0.1:8000"
/// ```
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| DEFAULT_SERVER_ADDRESS.to_string())
}

/// Returns the directory served under `/static`.
///
/// Reads `STATIC_DIR`, falling back to the web client's build output
/// `./client/dist`.
pub fn static_dir() -> PathBuf {
    env::var("STATIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATIC_DIR))
}

/// Maximum number of tracks fetched for a playlist, continuations included.
///
/// Reads `PLAYLIST_TRACK_LIMIT`; unset or unparsable values fall back to 100.
pub fn playlist_track_limit() -> usize {
    env::var("PLAYLIST_TRACK_LIMIT")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_PLAYLIST_TRACK_LIMIT)
}
