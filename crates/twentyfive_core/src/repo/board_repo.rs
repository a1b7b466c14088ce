//! Board repository contracts and JSON file implementation.
//!
//! # Responsibility
//! - Load the persisted board (or report that none exists yet).
//! - Commit a whole board to durable storage atomically.
//!
//! # Invariants
//! - The canonical file is only ever replaced by rename; a partially
//!   written board is never observable at the canonical path.
//! - A failed save removes its temp file.
//! - Decoded boards are normalized (`null` containers become empty).

use crate::model::board::BoardState;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::Builder;

const TEMP_FILE_SUFFIX: &str = ".tmp";

pub type PersistResult<T> = Result<T, PersistError>;

/// Step of the load/save pipeline that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistStage {
    CreateDir,
    Read,
    CreateTemp,
    Write,
    Sync,
    Rename,
}

impl PersistStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreateDir => "create_dir",
            Self::Read => "read",
            Self::CreateTemp => "create_temp",
            Self::Write => "write",
            Self::Sync => "sync",
            Self::Rename => "rename",
        }
    }
}

/// Errors from board persistence.
#[derive(Debug)]
pub enum PersistError {
    /// File-system failure at one pipeline stage.
    Io {
        stage: PersistStage,
        path: PathBuf,
        source: io::Error,
    },
    /// Board could not be serialized.
    Encode(serde_json::Error),
    /// Persisted file is not a valid board.
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl PersistError {
    fn io(stage: PersistStage, path: &Path, source: io::Error) -> Self {
        Self::Io {
            stage,
            path: path.to_path_buf(),
            source,
        }
    }
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io {
                stage,
                path,
                source,
            } => write!(
                f,
                "board {} failed for `{}`: {source}",
                stage.as_str(),
                path.display()
            ),
            Self::Encode(err) => write!(f, "encode board: {err}"),
            Self::Decode { path, source } => {
                write!(f, "decode board file `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
            Self::Decode { source, .. } => Some(source),
        }
    }
}

/// Repository interface for whole-board persistence.
pub trait BoardRepository {
    /// Loads the stored board; `None` when nothing has been stored yet.
    fn load(&self) -> PersistResult<Option<BoardState>>;
    /// Durably replaces the stored board.
    fn save(&self, board: &BoardState) -> PersistResult<()>;
}

/// Board persisted as one pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileBoardRepository {
    path: PathBuf,
}

impl JsonFileBoardRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Canonical data file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn data_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn temp_prefix(&self) -> String {
        let stem = self
            .path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "board".to_string());
        format!(".{stem}-")
    }

    /// Removes temp files left behind by an interrupted save.
    ///
    /// Returns how many files were removed.
    pub fn sweep_stale_temp_files(&self) -> usize {
        let prefix = self.temp_prefix();
        let Ok(entries) = fs::read_dir(self.data_dir()) else {
            return 0;
        };

        let mut removed = 0;
        for entry in entries.flatten() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if !name.starts_with(&prefix) || !name.ends_with(TEMP_FILE_SUFFIX) {
                continue;
            }
            match fs::remove_file(entry.path()) {
                Ok(()) => removed += 1,
                Err(err) => warn!(
                    "event=temp_sweep module=persist status=error error_code=remove_failed error={}",
                    err
                ),
            }
        }
        removed
    }

    fn write_atomically(&self, bytes: &[u8]) -> PersistResult<()> {
        let dir = self.data_dir();
        let mut tmp = Builder::new()
            .prefix(&self.temp_prefix())
            .suffix(TEMP_FILE_SUFFIX)
            .tempfile_in(&dir)
            .map_err(|err| PersistError::io(PersistStage::CreateTemp, &dir, err))?;

        // Dropping `tmp` on any early return deletes the temp file.
        tmp.write_all(bytes)
            .and_then(|()| tmp.flush())
            .map_err(|err| PersistError::io(PersistStage::Write, tmp.path(), err))?;
        tmp.as_file()
            .sync_all()
            .map_err(|err| PersistError::io(PersistStage::Sync, tmp.path(), err))?;
        tmp.persist(&self.path)
            .map_err(|err| PersistError::io(PersistStage::Rename, &self.path, err.error))?;

        sync_dir(&dir);
        Ok(())
    }
}

impl BoardRepository for JsonFileBoardRepository {
    fn load(&self) -> PersistResult<Option<BoardState>> {
        let dir = self.data_dir();
        fs::create_dir_all(&dir)
            .map_err(|err| PersistError::io(PersistStage::CreateDir, &dir, err))?;

        let swept = self.sweep_stale_temp_files();
        if swept > 0 {
            warn!(
                "event=temp_sweep module=persist status=ok removed={}",
                swept
            );
        }

        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(PersistError::io(PersistStage::Read, &self.path, err)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let mut board: BoardState =
            serde_json::from_slice(&bytes).map_err(|source| PersistError::Decode {
                path: self.path.clone(),
                source,
            })?;
        board.normalize();
        Ok(Some(board))
    }

    fn save(&self, board: &BoardState) -> PersistResult<()> {
        let started_at = Instant::now();
        let mut bytes = serde_json::to_vec_pretty(board).map_err(PersistError::Encode)?;
        bytes.push(b'\n');

        match self.write_atomically(&bytes) {
            Ok(()) => {
                info!(
                    "event=board_save module=persist status=ok bytes={} duration_ms={}",
                    bytes.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                let stage = match &err {
                    PersistError::Io { stage, .. } => stage.as_str(),
                    _ => "encode",
                };
                error!(
                    "event=board_save module=persist status=error duration_ms={} error_code=save_failed stage={} error={}",
                    started_at.elapsed().as_millis(),
                    stage,
                    err
                );
                Err(err)
            }
        }
    }
}

#[cfg(unix)]
fn sync_dir(dir: &Path) {
    let result = fs::File::open(dir).and_then(|handle| handle.sync_all());
    if let Err(err) = result {
        warn!(
            "event=dir_sync module=persist status=error error_code=dir_sync_failed error={}",
            err
        );
    }
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) {}

#[cfg(test)]
mod tests {
    use super::{BoardRepository, JsonFileBoardRepository};
    use std::fs;

    #[test]
    fn temp_prefix_follows_data_file_stem() {
        let repo = JsonFileBoardRepository::new("data/board.json");
        assert_eq!(repo.temp_prefix(), ".board-");
        assert_eq!(repo.data_dir().to_str(), Some("data"));

        let bare = JsonFileBoardRepository::new("board.json");
        assert_eq!(bare.data_dir().to_str(), Some("."));
    }

    #[test]
    fn sweep_removes_only_matching_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".board-abc123.tmp"), "{").unwrap();
        fs::write(dir.path().join(".other-abc123.tmp"), "{").unwrap();
        fs::write(dir.path().join("board.json"), "{}").unwrap();

        let repo = JsonFileBoardRepository::new(dir.path().join("board.json"));
        assert_eq!(repo.sweep_stale_temp_files(), 1);
        assert!(!dir.path().join(".board-abc123.tmp").exists());
        assert!(dir.path().join(".other-abc123.tmp").exists());
        assert!(dir.path().join("board.json").exists());
    }

    #[test]
    fn whitespace_only_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.json");
        fs::write(&path, " \n").unwrap();

        let repo = JsonFileBoardRepository::new(&path);
        assert!(repo.load().unwrap().is_none());
    }
}
