//! Category domain model.

use crate::model::task::Task;
use crate::model::null_as_default;
use serde::{Deserialize, Serialize};

/// Opaque category identifier.
pub type CategoryId = String;

/// Named column of tasks. Task order is the on-screen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tasks: Vec<Task>,
}

impl Category {
    /// Creates an empty category.
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    /// Sum of task sizes, i.e. the capacity points this column consumes.
    pub fn load(&self) -> u32 {
        self.tasks.iter().map(|task| u32::from(task.size)).sum()
    }

    /// Index of the task with `task_id`, if present.
    pub fn task_index(&self, task_id: &str) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == task_id)
    }

    /// Task ids in column order.
    pub fn task_ids(&self) -> Vec<&str> {
        self.tasks.iter().map(|task| task.id.as_str()).collect()
    }
}
