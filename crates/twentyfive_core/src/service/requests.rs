//! Request models accepted by the board store.
//!
//! # Responsibility
//! - Mirror the plain values a transport decodes from its callers.
//! - Validate and resolve them into engine targets before any mutation.
//!
//! # Invariants
//! - `validate`/`target` never touch board state.
//! - A `category` location without a category id is an invalid request.

use crate::engine::error::{BoardError, BoardResult};
use crate::engine::tasks::TaskDestination;
use crate::model::location::{
    CategoryLocationKind, CategoryTarget, TaskLocationKind, TaskTarget,
};
use crate::model::task::{validate_size, ChecklistItem, Task, TaskLink, TaskState};
use serde::Deserialize;

/// Task payload of a create request. `id` is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub notes: String,
    pub state: TaskState,
    pub size: u8,
    #[serde(default)]
    pub links: Vec<TaskLink>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    #[serde(default)]
    pub urgent: bool,
    #[serde(default)]
    pub focused: bool,
}

impl NewTask {
    pub fn new(name: impl Into<String>, state: TaskState, size: u8) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            notes: String::new(),
            state,
            size,
            links: Vec::new(),
            checklist: Vec::new(),
            urgent: false,
            focused: false,
        }
    }

    /// Caller-chosen id, if one was supplied and is non-empty.
    pub fn requested_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Builds the stored task under `id`.
    pub fn into_task(self, id: String) -> Task {
        Task {
            id,
            name: self.name,
            description: self.description,
            notes: self.notes,
            state: self.state,
            size: self.size,
            links: self.links,
            checklist: self.checklist,
            urgent: self.urgent,
            focused: self.focused,
            source_id: None,
            source: None,
        }
    }
}

/// `CreateTask(location, categoryId?, position?, task)`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub location: TaskLocationKind,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub position: Option<usize>,
    pub task: NewTask,
}

impl CreateTaskRequest {
    pub fn in_category(category_id: impl Into<String>, task: NewTask) -> Self {
        Self {
            location: TaskLocationKind::Category,
            category_id: Some(category_id.into()),
            position: None,
            task,
        }
    }

    pub fn in_backburner(task: NewTask) -> Self {
        Self {
            location: TaskLocationKind::Backburner,
            category_id: None,
            position: None,
            task,
        }
    }

    pub fn in_archive(task: NewTask) -> Self {
        Self {
            location: TaskLocationKind::Archive,
            category_id: None,
            position: None,
            task,
        }
    }

    pub fn at_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Checks the payload and resolves the insertion target.
    ///
    /// # Errors
    /// - `InvalidTaskSize` for sizes outside `[1, 5]`.
    /// - `InvalidRequest` for a category location without category id.
    pub fn validate(&self) -> BoardResult<TaskTarget> {
        validate_size(self.task.size)?;
        resolve_task_target(self.location, self.category_id.as_deref(), self.position)
    }
}

/// `MoveTask(id, destination)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTaskRequest {
    #[serde(default)]
    pub location: TaskLocationKind,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub position: Option<usize>,
    /// Explicit provenance recorded when parking the task.
    #[serde(default)]
    pub source_id: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

impl MoveTaskRequest {
    pub fn to_category(category_id: impl Into<String>) -> Self {
        Self {
            location: TaskLocationKind::Category,
            category_id: Some(category_id.into()),
            ..Self::default()
        }
    }

    pub fn to_backburner() -> Self {
        Self {
            location: TaskLocationKind::Backburner,
            ..Self::default()
        }
    }

    pub fn to_archive() -> Self {
        Self {
            location: TaskLocationKind::Archive,
            ..Self::default()
        }
    }

    pub fn at_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Resolves the move destination.
    ///
    /// # Errors
    /// - `InvalidRequest` for a category location without category id.
    pub fn destination(&self) -> BoardResult<TaskDestination> {
        let target =
            resolve_task_target(self.location, self.category_id.as_deref(), self.position)?;
        Ok(TaskDestination {
            target,
            source_id: non_empty(self.source_id.as_deref()),
            source: non_empty(self.source.as_deref()),
        })
    }
}

/// `MoveCategory(id, destination)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCategoryRequest {
    #[serde(default)]
    pub location: CategoryLocationKind,
    #[serde(default)]
    pub position: Option<usize>,
}

impl MoveCategoryRequest {
    pub fn to(location: CategoryLocationKind) -> Self {
        Self {
            location,
            position: None,
        }
    }

    pub fn at_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    pub fn target(&self) -> CategoryTarget {
        CategoryTarget {
            kind: self.location,
            position: self.position,
        }
    }
}

fn resolve_task_target(
    location: TaskLocationKind,
    category_id: Option<&str>,
    position: Option<usize>,
) -> BoardResult<TaskTarget> {
    match location {
        TaskLocationKind::Category => {
            let category_id = non_empty(category_id).ok_or_else(|| {
                BoardError::invalid_request("categoryId required for category location")
            })?;
            Ok(TaskTarget::Category {
                category_id,
                position,
            })
        }
        TaskLocationKind::Backburner => Ok(TaskTarget::Backburner { position }),
        TaskLocationKind::Archive => Ok(TaskTarget::Archive { position }),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
