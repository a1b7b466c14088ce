//! Board store: the one shared board behind a reader/writer lock.
//!
//! # Responsibility
//! - Load (or seed) the board at startup and audit it.
//! - Serialize mutations, persist each one, and hand out snapshots.
//!
//! # Invariants
//! - Mutations run against a staged clone; the live board is replaced only
//!   after the staged board is durably saved. A failed save leaves memory
//!   and disk at the previous committed board.
//! - Readers never observe a partial mutation.
//! - Log lines carry ids and error codes only, never names or free text.

use crate::engine::error::{BoardError, BoardResult, ErrorKind};
use crate::engine::invariants::audit;
use crate::model::board::BoardState;
use crate::model::category::Category;
use crate::model::id::{IdGenerator, UuidIdGenerator};
use crate::model::task::{Task, TaskPatch};
use crate::repo::board_repo::{BoardRepository, PersistError};
use crate::service::requests::{CreateTaskRequest, MoveCategoryRequest, MoveTaskRequest};
use crate::service::seed::seed_board;
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced at the store boundary.
#[derive(Debug)]
pub enum StoreError {
    /// Operation rejected by validation or a board invariant.
    Board(BoardError),
    /// Board could not be loaded or saved.
    Persist(PersistError),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Board(err) => err.kind(),
            Self::Persist(_) => ErrorKind::Persistence,
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Board(err) => write!(f, "{err}"),
            Self::Persist(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Board(err) => Some(err),
            Self::Persist(err) => Some(err),
        }
    }
}

impl From<BoardError> for StoreError {
    fn from(value: BoardError) -> Self {
        Self::Board(value)
    }
}

impl From<PersistError> for StoreError {
    fn from(value: PersistError) -> Self {
        Self::Persist(value)
    }
}

/// Result of a committed mutation: the touched entity plus a board snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed<T> {
    pub entity: T,
    pub board: BoardState,
}

/// Shared board with durable, serialized mutations.
pub struct BoardStore<R: BoardRepository> {
    repo: R,
    ids: Box<dyn IdGenerator>,
    state: RwLock<BoardState>,
}

impl<R: BoardRepository> BoardStore<R> {
    /// Opens the store with random UUID ids.
    pub fn open(repo: R) -> StoreResult<Self> {
        Self::open_with_ids(repo, Box::new(UuidIdGenerator))
    }

    /// Opens the store with an injected id generator.
    ///
    /// An absent or empty data file is replaced by the seed board, which is
    /// saved before the store is returned.
    ///
    /// # Errors
    /// - `Persist` when the file cannot be read or decoded, or the seed
    ///   board cannot be written.
    pub fn open_with_ids(repo: R, ids: Box<dyn IdGenerator>) -> StoreResult<Self> {
        let started_at = Instant::now();
        let loaded = repo.load().map_err(|err| {
            error!(
                "event=store_open module=store status=error duration_ms={} error_code=load_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            err
        })?;

        let seeded = loaded.is_none();
        let board = match loaded {
            Some(board) => board,
            None => {
                let board = seed_board(ids.as_ref());
                repo.save(&board)?;
                board
            }
        };

        for violation in audit(&board) {
            warn!(
                "event=board_audit module=store status=error error_code=invariant_violation detail={}",
                violation
            );
        }
        info!(
            "event=store_open module=store status=ok seeded={} categories={} duration_ms={}",
            seeded,
            board.categories.len(),
            started_at.elapsed().as_millis()
        );

        Ok(Self {
            repo,
            ids,
            state: RwLock::new(board),
        })
    }

    /// Repository backing this store.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Deep, independent snapshot of the committed board.
    pub fn get_state(&self) -> BoardState {
        self.read_state().clone()
    }

    /// Creates a task, assigning a fresh id when the request carries none.
    pub fn create_task(&self, request: CreateTaskRequest) -> StoreResult<Committed<Task>> {
        let target = request.validate()?;
        let task_id = match request.task.requested_id() {
            Some(id) => id.to_string(),
            None => self.ids.next_id(),
        };
        let task = request.task.into_task(task_id.clone());
        self.commit("task_create", &task_id, |board| {
            board.create_task(task, &target)
        })
    }

    /// Applies a partial patch to a task.
    pub fn update_task(&self, task_id: &str, patch: &TaskPatch) -> StoreResult<Committed<Task>> {
        self.commit("task_update", task_id, |board| {
            board.update_task(task_id, patch)
        })
    }

    /// Moves a task to another container or position.
    pub fn move_task(
        &self,
        task_id: &str,
        request: &MoveTaskRequest,
    ) -> StoreResult<Committed<Task>> {
        let destination = request.destination()?;
        self.commit("task_move", task_id, |board| {
            board.move_task(task_id, &destination)
        })
    }

    /// Permanently deletes an archived task and returns the new board.
    pub fn delete_task(&self, task_id: &str) -> StoreResult<BoardState> {
        self.commit("task_delete", task_id, |board| board.delete_task(task_id))
            .map(|committed| committed.board)
    }

    /// Appends a new empty category to the active board.
    pub fn create_category(&self, name: &str) -> StoreResult<Committed<Category>> {
        let category_id = self.ids.next_id();
        self.commit("category_create", &category_id, |board| {
            board.create_category(category_id.clone(), name)
        })
    }

    pub fn rename_category(
        &self,
        category_id: &str,
        name: &str,
    ) -> StoreResult<Committed<Category>> {
        self.commit("category_rename", category_id, |board| {
            board.rename_category(category_id, name)
        })
    }

    pub fn move_category(
        &self,
        category_id: &str,
        request: &MoveCategoryRequest,
    ) -> StoreResult<Committed<Category>> {
        let target = request.target();
        self.commit("category_move", category_id, |board| {
            board.move_category(category_id, target)
        })
    }

    pub fn reorder_category_tasks(
        &self,
        category_id: &str,
        ordered_ids: &[String],
    ) -> StoreResult<Committed<Category>> {
        self.commit("category_reorder", category_id, |board| {
            board.reorder_category_tasks(category_id, ordered_ids)
        })
    }

    /// Focuses one task, or clears focus when `task_id` is `None` or empty.
    pub fn set_focused(&self, task_id: Option<&str>) -> StoreResult<Committed<Option<Task>>> {
        self.commit("task_focus", task_id.unwrap_or("-"), |board| {
            board.set_focused(task_id)
        })
    }

    /// Runs `mutate` on a staged copy, saves it, then swaps it in.
    ///
    /// The write lock is held across the save so mutations never interleave.
    fn commit<T>(
        &self,
        op: &'static str,
        subject_id: &str,
        mutate: impl FnOnce(&mut BoardState) -> BoardResult<T>,
    ) -> StoreResult<Committed<T>> {
        let started_at = Instant::now();
        debug!("event={} module=store status=start id={}", op, subject_id);

        let mut live = self.write_state();
        let mut staged = live.clone();
        let entity = match mutate(&mut staged) {
            Ok(entity) => entity,
            Err(err) => {
                warn!(
                    "event={} module=store status=error id={} duration_ms={} error_code={}",
                    op,
                    subject_id,
                    started_at.elapsed().as_millis(),
                    err.kind().code()
                );
                return Err(err.into());
            }
        };

        if let Err(err) = self.repo.save(&staged) {
            error!(
                "event={} module=store status=error id={} duration_ms={} error_code={}",
                op,
                subject_id,
                started_at.elapsed().as_millis(),
                ErrorKind::Persistence.code()
            );
            return Err(err.into());
        }

        *live = staged;
        info!(
            "event={} module=store status=ok id={} duration_ms={}",
            op,
            subject_id,
            started_at.elapsed().as_millis()
        );
        Ok(Committed {
            entity,
            board: live.clone(),
        })
    }

    // The live board is only ever replaced wholesale after a successful
    // save, so a poisoned lock still guards a committed board.
    fn read_state(&self) -> RwLockReadGuard<'_, BoardState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, BoardState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
