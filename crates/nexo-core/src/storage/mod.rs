mod local;

pub use local::{AppData, LocalStore};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/nexo[-dev]/` based on NEXO_ENV, creating it if needed.
///
/// Set NEXO_ENV=dev to use the development data directory, or NEXO_DATA_DIR
/// to point somewhere else entirely (tests use a temp dir).
pub fn data_dir() -> Result<PathBuf, StorageError> {
    if let Ok(dir) = std::env::var("NEXO_DATA_DIR") {
        let dir = PathBuf::from(dir);
        std::fs::create_dir_all(&dir).map_err(|source| StorageError::DataDir {
            path: dir.clone(),
            source,
        })?;
        return Ok(dir);
    }

    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("NEXO_ENV").unwrap_or_else(|_| "production".to_string());
    let dir = if env == "dev" {
        base_dir.join("nexo-dev")
    } else {
        base_dir.join("nexo")
    };

    std::fs::create_dir_all(&dir).map_err(|source| StorageError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
