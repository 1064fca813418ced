//! Persisted auth session storage.
//!
//! The session file replaces the browser-local token storage of the web
//! client: one small JSON file holding the bearer token and user id,
//! written with owner-only permissions.

use std::fs;
use std::path::PathBuf;

use scribe_core::auth::AuthSession;
use scribe_core::error::{Result, ScribeError};

use crate::paths::ScribePaths;

/// Storage for the persisted session file (session.json).
///
/// Responsibilities:
/// - Load session.json into an [`AuthSession`], if present
/// - Persist a new session on login, mode 600 on Unix
/// - Delete the file on logout
pub struct SessionStorage {
    path: PathBuf,
}

impl SessionStorage {
    /// Creates storage for the default path (`~/.config/scribe/session.json`).
    pub fn new() -> Result<Self> {
        let path = ScribePaths::session_file().map_err(|e| ScribeError::config(e.to_string()))?;
        Ok(Self { path })
    }

    /// Creates storage for a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the persisted session.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(AuthSession))`: A session file exists and parsed
    /// - `Ok(None)`: No session file
    /// - `Err(ScribeError)`: Read or parse failure
    pub fn load(&self) -> Result<Option<AuthSession>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        let session = serde_json::from_str(&content)?;
        Ok(Some(session))
    }

    /// Persists the session, replacing any previous one.
    pub fn save(&self, session: &AuthSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)?;

        // Owner read/write only; the file carries a bearer token.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&self.path, permissions)?;
        }

        Ok(())
    }

    /// Deletes the persisted session. Missing file is not an error.
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    /// Returns the path to the session file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
