//! Location taxonomy for tasks and categories.
//!
//! # Responsibility
//! - Name the containers a task or category can occupy.
//! - Express exact positions (addresses) used for detach/reattach.
//! - Express validated insertion targets produced from caller requests.
//!
//! # Invariants
//! - An address always points at an existing element at the time it is
//!   produced; it is only valid until the next structural mutation.
//! - A target position outside current bounds means "append".

use crate::engine::error::BoardError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Where a task can live.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskLocationKind {
    /// Inside an active category.
    #[default]
    Category,
    Backburner,
    Archive,
}

impl TaskLocationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Backburner => "backburner",
            Self::Archive => "archive",
        }
    }
}

impl Display for TaskLocationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskLocationKind {
    type Err = BoardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "category" => Ok(Self::Category),
            "backburner" => Ok(Self::Backburner),
            "archive" => Ok(Self::Archive),
            other => Err(BoardError::InvalidLocation(other.to_string())),
        }
    }
}

/// Where a category can live.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryLocationKind {
    /// The active board.
    #[default]
    Board,
    Backburner,
    Archive,
}

impl CategoryLocationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Board => "board",
            Self::Backburner => "backburner",
            Self::Archive => "archive",
        }
    }
}

impl Display for CategoryLocationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryLocationKind {
    type Err = BoardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "board" => Ok(Self::Board),
            "backburner" => Ok(Self::Backburner),
            "archive" => Ok(Self::Archive),
            other => Err(BoardError::InvalidLocation(other.to_string())),
        }
    }
}

/// Exact position of a task that was found or detached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAddress {
    Category {
        category_index: usize,
        task_index: usize,
    },
    Backburner(usize),
    Archive(usize),
}

impl TaskAddress {
    pub fn kind(self) -> TaskLocationKind {
        match self {
            Self::Category { .. } => TaskLocationKind::Category,
            Self::Backburner(_) => TaskLocationKind::Backburner,
            Self::Archive(_) => TaskLocationKind::Archive,
        }
    }
}

/// Exact position of a category that was found or detached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryAddress {
    Board(usize),
    Backburner(usize),
    Archive(usize),
}

impl CategoryAddress {
    pub fn kind(self) -> CategoryLocationKind {
        match self {
            Self::Board(_) => CategoryLocationKind::Board,
            Self::Backburner(_) => CategoryLocationKind::Backburner,
            Self::Archive(_) => CategoryLocationKind::Archive,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Board(index) | Self::Backburner(index) | Self::Archive(index) => index,
        }
    }
}

/// Validated insertion target for a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskTarget {
    Category {
        category_id: String,
        position: Option<usize>,
    },
    Backburner {
        position: Option<usize>,
    },
    Archive {
        position: Option<usize>,
    },
}

impl TaskTarget {
    pub fn kind(&self) -> TaskLocationKind {
        match self {
            Self::Category { .. } => TaskLocationKind::Category,
            Self::Backburner { .. } => TaskLocationKind::Backburner,
            Self::Archive { .. } => TaskLocationKind::Archive,
        }
    }
}

/// Validated insertion target for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryTarget {
    pub kind: CategoryLocationKind,
    pub position: Option<usize>,
}

/// Resolves an optional caller position against a sequence length.
///
/// Missing or out-of-bounds positions append.
pub fn insertion_index(position: Option<usize>, len: usize) -> usize {
    match position {
        Some(index) if index <= len => index,
        _ => len,
    }
}
