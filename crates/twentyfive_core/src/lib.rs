//! Core domain logic for the TwentyFive board.
//! This crate is the single source of truth for board invariants.

pub mod config;
pub mod engine;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{open_store, StoreConfig};
pub use engine::error::{BoardError, BoardResult, ErrorKind};
pub use engine::invariants::{audit, InvariantViolation, CATEGORY_LIMIT, COLUMN_CAPACITY};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::board::BoardState;
pub use model::category::{Category, CategoryId};
pub use model::id::{IdGenerator, SequentialIdGenerator, UuidIdGenerator};
pub use model::location::{CategoryLocationKind, TaskLocationKind};
pub use model::task::{ChecklistItem, Task, TaskId, TaskLink, TaskPatch, TaskState};
pub use repo::board_repo::{BoardRepository, JsonFileBoardRepository, PersistError, PersistResult};
pub use service::board_store::{BoardStore, Committed, StoreError, StoreResult};
pub use service::requests::{CreateTaskRequest, MoveCategoryRequest, MoveTaskRequest, NewTask};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
