//! Engine error contracts.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type BoardResult<T> = Result<T, BoardError>;

/// Stable classification of failures for transport-level mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    TaskNotFound,
    CategoryNotFound,
    CapacityExceeded,
    CategoryLimit,
    DuplicateCategory,
    InvalidState,
    InvalidTaskSize,
    InvalidLocation,
    InvalidRequest,
    Persistence,
}

impl ErrorKind {
    /// Snake-case code used in log lines.
    pub fn code(self) -> &'static str {
        match self {
            Self::TaskNotFound => "task_not_found",
            Self::CategoryNotFound => "category_not_found",
            Self::CapacityExceeded => "capacity_exceeded",
            Self::CategoryLimit => "category_limit",
            Self::DuplicateCategory => "duplicate_category",
            Self::InvalidState => "invalid_state",
            Self::InvalidTaskSize => "invalid_task_size",
            Self::InvalidLocation => "invalid_location",
            Self::InvalidRequest => "invalid_request",
            Self::Persistence => "persistence",
        }
    }
}

/// Errors from board mutations and request validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// No task with this id in the addressable containers.
    TaskNotFound(String),
    /// No category with this id in the searched containers.
    CategoryNotFound(String),
    /// Column point-sum would exceed the capacity.
    CapacityExceeded { category_id: String, load: u32 },
    /// Board would exceed the category ceiling.
    CategoryLimit,
    /// Category name already used in one of the three category containers.
    DuplicateCategory(String),
    /// Workflow state outside the enumerated set.
    InvalidState(String),
    /// Task size outside `[1, 5]`.
    InvalidTaskSize(u8),
    /// Location kind not valid for the operation.
    InvalidLocation(String),
    /// Malformed or incomplete request.
    InvalidRequest(String),
    /// Delete was requested for a task that is not archived.
    NotArchived(String),
}

impl BoardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TaskNotFound(_) => ErrorKind::TaskNotFound,
            Self::CategoryNotFound(_) => ErrorKind::CategoryNotFound,
            Self::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            Self::CategoryLimit => ErrorKind::CategoryLimit,
            Self::DuplicateCategory(_) => ErrorKind::DuplicateCategory,
            Self::InvalidState(_) => ErrorKind::InvalidState,
            Self::InvalidTaskSize(_) => ErrorKind::InvalidTaskSize,
            Self::InvalidLocation(_) => ErrorKind::InvalidLocation,
            Self::InvalidRequest(_) | Self::NotArchived(_) => ErrorKind::InvalidRequest,
        }
    }

    pub(crate) fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::CategoryNotFound(id) => write!(f, "category not found: {id}"),
            Self::CapacityExceeded { category_id, load } => write!(
                f,
                "column capacity exceeded: category {category_id} would hold {load} points"
            ),
            Self::CategoryLimit => write!(f, "maximum number of categories reached"),
            Self::DuplicateCategory(name) => write!(f, "duplicate category name: `{name}`"),
            Self::InvalidState(value) => write!(f, "invalid state value: `{value}`"),
            Self::InvalidTaskSize(size) => {
                write!(f, "task size must be between 1 and 5, got {size}")
            }
            Self::InvalidLocation(value) => write!(f, "invalid location: `{value}`"),
            Self::InvalidRequest(message) => write!(f, "invalid request: {message}"),
            Self::NotArchived(id) => write!(f, "invalid request: task {id} is not in archive"),
        }
    }
}

impl Error for BoardError {}

#[cfg(test)]
mod tests {
    use super::{BoardError, ErrorKind};

    #[test]
    fn not_archived_is_classified_as_invalid_request() {
        let err = BoardError::NotArchived("t1".to_string());
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
        assert_eq!(err.to_string(), "invalid request: task t1 is not in archive");
    }
}
