//! Board aggregate root.
//!
//! # Responsibility
//! - Hold the five independent containers that make up one board.
//! - Provide whole-board traversal used by invariant checks and focus
//!   normalization.
//!
//! # Invariants
//! - Every container is present (never `null`) after decoding.
//! - `Clone` is a deep copy; snapshots never alias live state.
//!
//! # See also
//! - crate::engine::invariants

use crate::model::category::Category;
use crate::model::null_as_default;
use crate::model::task::Task;
use serde::{Deserialize, Serialize};

/// Persisted board: active columns plus parked tasks and categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardState {
    /// Active board columns, at most `CATEGORY_LIMIT`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<Category>,
    /// Flat pool of parked tasks.
    #[serde(default, deserialize_with = "null_as_default")]
    pub backburner: Vec<Task>,
    /// Flat pool of archived tasks. The only place tasks can be deleted from.
    #[serde(default, deserialize_with = "null_as_default")]
    pub archives: Vec<Task>,
    /// Categories parked off the board with their tasks.
    #[serde(default, deserialize_with = "null_as_default")]
    pub category_backburner: Vec<Category>,
    /// Categories archived off the board with their tasks.
    #[serde(default, deserialize_with = "null_as_default")]
    pub category_archives: Vec<Category>,
}

impl BoardState {
    /// Normalizes decoded data so later code never sees legacy shapes.
    pub fn normalize(&mut self) {
        self.tasks_mut().for_each(Task::normalize);
    }

    /// Every category in every container, board first.
    pub fn all_categories(&self) -> impl Iterator<Item = &Category> {
        self.categories
            .iter()
            .chain(self.category_backburner.iter())
            .chain(self.category_archives.iter())
    }

    /// Every task in every container, in find order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.categories
            .iter()
            .flat_map(|category| category.tasks.iter())
            .chain(self.backburner.iter())
            .chain(self.archives.iter())
            .chain(
                self.category_backburner
                    .iter()
                    .chain(self.category_archives.iter())
                    .flat_map(|category| category.tasks.iter()),
            )
    }

    /// Mutable variant of [`BoardState::tasks`].
    pub fn tasks_mut(&mut self) -> impl Iterator<Item = &mut Task> {
        self.categories
            .iter_mut()
            .flat_map(|category| category.tasks.iter_mut())
            .chain(self.backburner.iter_mut())
            .chain(self.archives.iter_mut())
            .chain(
                self.category_backburner
                    .iter_mut()
                    .chain(self.category_archives.iter_mut())
                    .flat_map(|category| category.tasks.iter_mut()),
            )
    }

    /// Returns whether any container holds a task with `task_id`.
    pub fn contains_task(&self, task_id: &str) -> bool {
        self.tasks().any(|task| task.id == task_id)
    }

    /// The focused task, if any.
    pub fn focused_task(&self) -> Option<&Task> {
        self.tasks().find(|task| task.focused)
    }
}
