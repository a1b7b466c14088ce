//! Store configuration and bootstrap.
//!
//! # Responsibility
//! - Hold the settings needed to open a file-backed board store.
//! - Open the store with the JSON file repository.
//!
//! # Invariants
//! - The default data file is `data/board.json`, relative to the working
//!   directory.

use crate::repo::board_repo::JsonFileBoardRepository;
use crate::service::board_store::{BoardStore, StoreResult};
use log::info;
use std::path::PathBuf;

pub const DEFAULT_DATA_FILE: &str = "data/board.json";

/// Settings for a file-backed store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Canonical board file; its parent directory is created on open.
    pub data_file: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

impl StoreConfig {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
        }
    }
}

/// Opens the board store described by `config`.
///
/// # Side effects
/// - Creates the data directory and sweeps stale temp files.
/// - Writes the seed board when the data file is absent or empty.
pub fn open_store(config: &StoreConfig) -> StoreResult<BoardStore<JsonFileBoardRepository>> {
    info!(
        "event=store_open module=store status=start data_file={}",
        config.data_file.display()
    );
    BoardStore::open(JsonFileBoardRepository::new(config.data_file.clone()))
}

#[cfg(test)]
mod tests {
    use super::{open_store, StoreConfig, DEFAULT_DATA_FILE};
    use std::path::Path;

    #[test]
    fn default_points_at_data_dir() {
        assert_eq!(StoreConfig::default().data_file, Path::new(DEFAULT_DATA_FILE));
    }

    #[test]
    fn open_store_creates_nested_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::new(dir.path().join("nested").join("board.json"));

        let store = open_store(&config).unwrap();
        assert!(config.data_file.exists());
        assert_eq!(store.repository().path(), config.data_file.as_path());
    }
}
