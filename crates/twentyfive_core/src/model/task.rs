//! Task domain model.
//!
//! # Responsibility
//! - Define the work item stored in categories, backburner and archive.
//! - Validate workflow state and point size at construction/patch time.
//!
//! # Invariants
//! - `size` is always within `[MIN_TASK_SIZE, MAX_TASK_SIZE]`.
//! - `state` is one of the five workflow values.
//! - `source_id`/`source` are only meaningful while the task is parked.

use crate::engine::error::{BoardError, BoardResult};
use crate::model::null_as_default;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Smallest point weight a task may carry.
pub const MIN_TASK_SIZE: u8 = 1;
/// Largest point weight a task may carry.
pub const MAX_TASK_SIZE: u8 = 5;

/// Opaque task identifier.
pub type TaskId = String;

/// Workflow state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Todo,
    Doing,
    Blocked,
    Delegated,
    Done,
}

impl TaskState {
    /// Wire name used in the persisted file.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Blocked => "blocked",
            Self::Delegated => "delegated",
            Self::Done => "done",
        }
    }
}

impl Display for TaskState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskState {
    type Err = BoardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "todo" => Ok(Self::Todo),
            "doing" => Ok(Self::Doing),
            "blocked" => Ok(Self::Blocked),
            "delegated" => Ok(Self::Delegated),
            "done" => Ok(Self::Done),
            other => Err(BoardError::InvalidState(other.to_string())),
        }
    }
}

/// Hyperlink attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskLink {
    pub text: String,
    pub url: String,
}

/// One checklist entry of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub text: String,
    pub done: bool,
}

/// Work item owned by exactly one container of the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
    pub state: TaskState,
    /// Capacity points consumed inside an active category.
    pub size: u8,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub links: Vec<TaskLink>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub checklist: Vec<ChecklistItem>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub urgent: bool,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub focused: bool,
    /// Id of the category the task was parked from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    /// Name of the category the task was parked from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Task {
    /// Creates a task with empty free-text fields and no flags.
    ///
    /// # Errors
    /// - `InvalidTaskSize` when `size` is outside `[1, 5]`.
    pub fn new(
        id: impl Into<TaskId>,
        name: impl Into<String>,
        state: TaskState,
        size: u8,
    ) -> BoardResult<Self> {
        Ok(Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            notes: String::new(),
            state,
            size: validate_size(size)?,
            links: Vec::new(),
            checklist: Vec::new(),
            urgent: false,
            focused: false,
            source_id: None,
            source: None,
        })
    }

    /// Drops the board-scoped flags a parked task must not carry.
    pub fn park(&mut self) {
        self.urgent = false;
        self.focused = false;
    }

    /// Forgets where a parked task came from.
    pub fn clear_source(&mut self) {
        self.source_id = None;
        self.source = None;
    }

    /// Collapses empty source strings (older files write `""`) into `None`.
    pub(crate) fn normalize(&mut self) {
        if self.source_id.as_deref() == Some("") {
            self.source_id = None;
        }
        if self.source.as_deref() == Some("") {
            self.source = None;
        }
    }
}

/// Partial update applied by `UpdateTask`.
///
/// `None` fields are left untouched. List fields replace the whole list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TaskPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub state: Option<TaskState>,
    pub size: Option<u8>,
    pub links: Option<Vec<TaskLink>>,
    pub checklist: Option<Vec<ChecklistItem>>,
    pub urgent: Option<bool>,
}

impl TaskPatch {
    /// Returns whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Applies the patch to `task`, validating before writing anything.
    ///
    /// # Errors
    /// - `InvalidTaskSize` when the new size is outside `[1, 5]`.
    pub fn apply(&self, task: &mut Task) -> BoardResult<()> {
        if let Some(size) = self.size {
            validate_size(size)?;
        }

        if let Some(name) = &self.name {
            task.name = name.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(notes) = &self.notes {
            task.notes = notes.clone();
        }
        if let Some(state) = self.state {
            task.state = state;
        }
        if let Some(size) = self.size {
            task.size = size;
        }
        if let Some(links) = &self.links {
            task.links = links.clone();
        }
        if let Some(checklist) = &self.checklist {
            task.checklist = checklist.clone();
        }
        if let Some(urgent) = self.urgent {
            task.urgent = urgent;
        }
        Ok(())
    }
}

/// Checks that `size` is a legal point weight.
///
/// # Errors
/// - `InvalidTaskSize` when `size` is outside `[1, 5]`.
pub fn validate_size(size: u8) -> BoardResult<u8> {
    if !(MIN_TASK_SIZE..=MAX_TASK_SIZE).contains(&size) {
        return Err(BoardError::InvalidTaskSize(size));
    }
    Ok(size)
}

fn is_false(value: &bool) -> bool {
    !*value
}
