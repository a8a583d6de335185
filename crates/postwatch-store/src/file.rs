use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::StoreError;
use crate::SeenState;

/// Seen-state persisted as a flat JSON object on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the state file. Never fails: a missing, unreadable, or corrupt
    /// file yields an empty map and a log line.
    ///
    /// Post ids written as JSON numbers are converted to strings. Entries
    /// with any other value type are dropped.
    #[must_use]
    pub fn load(&self) -> SeenState {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no seen-state file yet, starting empty");
                return SeenState::new();
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to read seen-state file, starting empty"
                );
                return SeenState::new();
            }
        };

        let value: Value = match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "seen-state file is not valid JSON, starting empty"
                );
                return SeenState::new();
            }
        };

        let Value::Object(entries) = value else {
            tracing::warn!(
                path = %self.path.display(),
                "seen-state file is not a JSON object, starting empty"
            );
            return SeenState::new();
        };

        let mut state = SeenState::new();
        for (creator_id, post_id) in entries {
            match post_id {
                Value::String(s) => {
                    state.insert(creator_id, s);
                }
                Value::Number(n) => {
                    state.insert(creator_id, n.to_string());
                }
                other => {
                    tracing::warn!(
                        creator = %creator_id,
                        value = %other,
                        "dropping seen-state entry with unsupported value"
                    );
                }
            }
        }

        tracing::debug!(path = %self.path.display(), entries = state.len(), "loaded seen-state");
        state
    }

    /// Writes the state, returning whether the write succeeded. Failures are
    /// logged, never raised.
    #[must_use]
    pub fn save(&self, state: &SeenState) -> bool {
        match self.try_save(state) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), entries = state.len(), "saved seen-state");
                true
            }
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "failed to save seen-state");
                false
            }
        }
    }

    /// Writes to a sibling `*.tmp` file, syncs it, then renames it over the
    /// real path. A crash before the rename leaves the old file untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory, temp file, or rename
    /// fails, or [`StoreError::Serialize`] if encoding fails.
    pub fn try_save(&self, state: &SeenState) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(state)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }

        let tmp_path = self.tmp_path();
        let written = write_synced(&tmp_path, content.as_bytes())
            .and_then(|()| fs::rename(&tmp_path, &self.path));

        if let Err(e) = written {
            // Best effort; the real file was never touched.
            let _ = fs::remove_file(&tmp_path);
            return Err(io_err(&self.path, e));
        }
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name: OsString = self
            .path
            .file_name()
            .map_or_else(|| OsString::from("seen-state"), OsString::from);
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn io_err(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}
