//! Local-storage-style JSON persistence.
//!
//! The whole application state -- session records, tasks, preferences, and
//! the serialized timer engine -- is one JSON document written synchronously
//! under the app's data directory. There is no schema versioning; a missing
//! file is simply a first run and loads as empty defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::StorageError;
use crate::prefs::Preferences;
use crate::schedule::Task;
use crate::session::SessionStore;
use crate::timer::TimerEngine;

const DATA_FILE: &str = "nexo.json";

/// Everything that survives a restart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppData {
    #[serde(default)]
    pub sessions: SessionStore,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub preferences: Preferences,
    /// Persisted engine state so a CLI process can pick up a countdown
    /// started by an earlier invocation.
    #[serde(default)]
    pub timer: Option<TimerEngine>,
}

/// Reads and writes the [`AppData`] snapshot file.
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    /// Open the store in the app's data directory.
    pub fn open() -> Result<Self, StorageError> {
        Ok(Self {
            path: data_dir()?.join(DATA_FILE),
        })
    }

    /// Open the store at an explicit path (tests).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Load the snapshot. A missing file is a first run and yields defaults;
    /// a present-but-unparsable file is a hard error.
    pub fn load(&self) -> Result<AppData, StorageError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(AppData::default()),
            Err(source) => {
                return Err(StorageError::LoadFailed {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_str(&contents).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Write the whole snapshot.
    pub fn save(&self, data: &AppData) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(data).map_err(|e| StorageError::SaveFailed {
            path: self.path.clone(),
            source: std::io::Error::other(e),
        })?;
        std::fs::write(&self.path, json).map_err(|source| StorageError::SaveFailed {
            path: self.path.clone(),
            source,
        })
    }

    /// Remove the snapshot entirely (logout). Missing file is fine.
    pub fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::SaveFailed {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::FocusSession;
    use chrono::Utc;

    fn store_in(dir: &tempfile::TempDir) -> LocalStore {
        LocalStore::at(dir.path().join(DATA_FILE))
    }

    #[test]
    fn first_run_loads_empty_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let data = store.load().unwrap();
        assert!(data.sessions.is_empty());
        assert!(data.tasks.is_empty());
        assert!(data.preferences.timer_sound);
        assert!(data.timer.is_none());
    }

    #[test]
    fn bundle_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut data = AppData::default();
        data.sessions
            .append(FocusSession::new("Matemática", 25, Utc::now(), true));
        data.preferences.dark_mode = false;
        data.timer = Some(TimerEngine::with_config(50, "Física"));
        store.save(&data).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.sessions.len(), 1);
        assert_eq!(loaded.sessions.sessions()[0].subject, "Matemática");
        assert!(!loaded.preferences.dark_mode);
        let timer = loaded.timer.unwrap();
        assert_eq!(timer.configured_min(), 50);
        assert_eq!(timer.subject(), "Física");
    }

    #[test]
    fn clear_removes_the_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&AppData::default()).unwrap();
        store.clear().unwrap();
        assert!(!store.path().exists());
        // Clearing twice is fine.
        store.clear().unwrap();
        // And the next load is a fresh first run.
        assert!(store.load().unwrap().sessions.is_empty());
    }

    #[test]
    fn corrupt_snapshot_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{not json").unwrap();
        assert!(matches!(
            store.load(),
            Err(StorageError::Corrupt { .. })
        ));
    }
}
