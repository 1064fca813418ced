//! Local image preview store.
//!
//! The web client held object URLs for selected images and revoked them on
//! teardown; here previews are real files in a per-batch temp directory so
//! the shell has something to open. The same lifecycle contract applies:
//! every registered preview must be released when it is no longer shown,
//! and dropping the store removes the whole batch directory.

use std::fs;
use std::path::{Path, PathBuf};

use scribe_core::error::{Result, ScribeError};
use scribe_core::image::ImageFile;
use tempfile::TempDir;
use uuid::Uuid;

use crate::paths::ScribePaths;

/// One registered preview: a file on disk plus its display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewHandle {
    pub id: String,
    pub display_name: String,
    pub path: PathBuf,
}

/// Owns the preview files of one intake batch.
pub struct PreviewStore {
    dir: TempDir,
    handles: Vec<PreviewHandle>,
}

impl PreviewStore {
    /// Creates a store under the scribe previews directory.
    pub fn new() -> Result<Self> {
        let parent = ScribePaths::previews_dir().map_err(|e| ScribeError::config(e.to_string()))?;
        fs::create_dir_all(&parent)?;
        Self::in_dir(&parent)
    }

    /// Creates a store whose batch directory lives under `parent`
    /// (for testing).
    pub fn in_dir(parent: &Path) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("batch-")
            .tempdir_in(parent)?;
        Ok(Self {
            dir,
            handles: Vec::new(),
        })
    }

    /// Writes one preview file for an ingested image and tracks the handle.
    pub fn register(&mut self, file: &ImageFile) -> Result<PreviewHandle> {
        let id = Uuid::new_v4().to_string();
        let path = self.dir.path().join(format!("{}-{}", id, file.file_name));
        fs::write(&path, &file.bytes)?;

        let handle = PreviewHandle {
            id,
            display_name: file.file_name.clone(),
            path,
        };
        self.handles.push(handle.clone());
        Ok(handle)
    }

    /// Currently registered previews in registration order.
    pub fn handles(&self) -> &[PreviewHandle] {
        &self.handles
    }

    /// Releases one preview by id. Unknown ids are a no-op.
    pub fn release(&mut self, id: &str) {
        if let Some(pos) = self.handles.iter().position(|h| h.id == id) {
            let handle = self.handles.remove(pos);
            if let Err(e) = fs::remove_file(&handle.path) {
                tracing::warn!(
                    target: "scribe::preview",
                    "failed to remove preview {}: {}",
                    handle.path.display(),
                    e
                );
            }
        }
    }

    /// Releases every registered preview.
    pub fn release_all(&mut self) {
        for handle in self.handles.drain(..) {
            if let Err(e) = fs::remove_file(&handle.path) {
                tracing::warn!(
                    target: "scribe::preview",
                    "failed to remove preview {}: {}",
                    handle.path.display(),
                    e
                );
            }
        }
    }

    /// The batch directory holding the preview files.
    ///
    /// Removed recursively when the store is dropped.
    pub fn batch_dir(&self) -> &Path {
        self.dir.path()
    }
}
