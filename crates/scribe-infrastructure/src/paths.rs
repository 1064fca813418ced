//! Unified path management for scribe local files.
//!
//! All scribe configuration and session data live under the platform's
//! standard directories, resolved via the `dirs` crate.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for scribe.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/scribe/            # Config directory
/// ├── config.toml              # Client configuration (base URL, timeout)
/// └── session.json             # Persisted auth session (mode 600)
///
/// ~/.local/share/scribe/       # Data directory
/// └── previews/                # Per-run image preview batches
/// ```
pub struct ScribePaths;

impl ScribePaths {
    /// Returns the scribe configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/scribe/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|d| d.join("scribe"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the scribe data directory, used for larger transient files.
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|d| d.join("scribe"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted session file.
    ///
    /// # Security Note
    ///
    /// The file carries a bearer token; writers must set permissions to 600
    /// on Unix systems.
    pub fn session_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("session.json"))
    }

    /// Returns the directory preview batches are created under.
    pub fn previews_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("previews"))
    }
}
