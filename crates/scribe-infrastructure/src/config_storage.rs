//! Client configuration file storage.
//!
//! Loads and saves config.toml. A missing or empty file yields the default
//! configuration; writes go through a temp file plus atomic rename so a
//! crashed write never leaves a truncated config behind.

use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::PathBuf;

use scribe_core::config::ClientConfig;
use scribe_core::error::{Result, ScribeError};

use crate::paths::ScribePaths;

/// Storage for the client configuration file (config.toml).
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Creates a storage handle for the default path
    /// (`~/.config/scribe/config.toml`).
    pub fn new() -> Result<Self> {
        let path = ScribePaths::config_file().map_err(|e| ScribeError::config(e.to_string()))?;
        Ok(Self { path })
    }

    /// Creates a storage handle for a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the configuration.
    ///
    /// # Returns
    ///
    /// - `Ok(ClientConfig)`: Parsed file, or defaults when the file is
    ///   missing or empty
    /// - `Err(ScribeError)`: Read or parse failure
    pub fn load(&self) -> Result<ClientConfig> {
        if !self.path.exists() {
            return Ok(ClientConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(ClientConfig::default());
        }

        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves the configuration atomically (temp file + rename).
    pub fn save(&self, config: &ClientConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let toml_string = toml::to_string_pretty(config)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Returns the path to the config file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| ScribeError::config("Config path has no parent directory"))?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| ScribeError::config("Config path has no file name"))?;

        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}
