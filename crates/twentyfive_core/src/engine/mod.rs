//! Board mutation engine.
//!
//! # Responsibility
//! - Find, detach, attach and reattach tasks and categories by address.
//! - Compose those primitives into the board operations (create, update,
//!   move, delete, rename, reorder, focus).
//!
//! # Invariants
//! - Every operation either fully applies or leaves the board exactly as it
//!   found it: failed attaches are compensated by reattaching at the
//!   original address, and validation runs before any write.
//! - Engine code never performs I/O; persistence is the store's concern.
//!
//! # See also
//! - crate::engine::invariants

pub mod categories;
pub mod error;
pub mod invariants;
pub mod tasks;

use crate::engine::error::BoardError;

/// A value handed back by a failed attach so the caller can put it back.
#[derive(Debug)]
pub struct Rejected<T> {
    pub value: T,
    pub error: BoardError,
}

impl<T> Rejected<T> {
    fn new(value: T, error: BoardError) -> Self {
        Self { value, error }
    }
}
