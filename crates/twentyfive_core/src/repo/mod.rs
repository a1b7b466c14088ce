//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the whole-board load/save contract used by the store.
//! - Isolate file-system details (temp files, fsync, rename) from the
//!   engine and the store.
//!
//! # Invariants
//! - Repositories persist whole boards; there are no partial writes.
//! - Repository APIs never mutate the board they are given.

pub mod board_repo;
