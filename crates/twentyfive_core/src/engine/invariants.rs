//! Invariant enforcement for the board.
//!
//! # Responsibility
//! - Gate mutations on column capacity, the category ceiling and name
//!   uniqueness.
//! - Normalize the exclusive urgent (per category) and focused (board-wide)
//!   flags.
//! - Audit a whole board, e.g. one decoded from disk.
//!
//! # Invariants
//! - Checks are pure reads; normalizers only touch flags, never order.

use crate::engine::error::{BoardError, BoardResult};
use crate::model::board::BoardState;
use crate::model::category::Category;
use crate::model::task::{MAX_TASK_SIZE, MIN_TASK_SIZE};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};

/// Maximum point-sum of one active category.
pub const COLUMN_CAPACITY: u32 = 5;
/// Maximum number of categories on the active board.
pub const CATEGORY_LIMIT: usize = 5;

/// Rejects a category whose tasks exceed the column capacity.
pub fn ensure_capacity(category: &Category) -> BoardResult<()> {
    let load = category.load();
    if load > COLUMN_CAPACITY {
        return Err(BoardError::CapacityExceeded {
            category_id: category.id.clone(),
            load,
        });
    }
    Ok(())
}

/// Rejects adding one more category to a full board.
pub fn ensure_board_has_room(board: &BoardState) -> BoardResult<()> {
    if board.categories.len() >= CATEGORY_LIMIT {
        return Err(BoardError::CategoryLimit);
    }
    Ok(())
}

/// Rejects `name` when any category other than `except_id` already uses it.
///
/// Comparison is case-sensitive across board, backburner and archive.
pub fn ensure_unique_name(
    board: &BoardState,
    name: &str,
    except_id: Option<&str>,
) -> BoardResult<()> {
    let taken = board
        .all_categories()
        .any(|category| category.name == name && Some(category.id.as_str()) != except_id);
    if taken {
        return Err(BoardError::DuplicateCategory(name.to_string()));
    }
    Ok(())
}

/// Makes `urgent_task_id` the only urgent task of `category`.
pub fn normalize_urgent(category: &mut Category, urgent_task_id: &str) {
    for task in &mut category.tasks {
        task.urgent = task.id == urgent_task_id;
    }
}

/// Makes `task_id` the only focused task of the board.
pub fn normalize_focus(board: &mut BoardState, task_id: &str) {
    for task in board.tasks_mut() {
        task.focused = task.id == task_id;
    }
}

/// Clears focus everywhere.
pub fn clear_focus(board: &mut BoardState) {
    for task in board.tasks_mut() {
        task.focused = false;
    }
}

/// Clears focus on every task of one category.
pub fn clear_category_focus(category: &mut Category) {
    for task in &mut category.tasks {
        task.focused = false;
    }
}

/// One broken invariant found by [`audit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    DuplicateTaskId(String),
    DuplicateCategoryId(String),
    DuplicateCategoryName(String),
    TooManyCategories(usize),
    OverCapacity { category_id: String, load: u32 },
    MultipleUrgent { category_id: String, count: usize },
    MultipleFocused(usize),
    FocusedOffBoard(String),
    TaskSizeOutOfRange { task_id: String, size: u8 },
}

impl Display for InvariantViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateTaskId(id) => write!(f, "duplicate task id {id}"),
            Self::DuplicateCategoryId(id) => write!(f, "duplicate category id {id}"),
            Self::DuplicateCategoryName(_) => write!(f, "duplicate category name"),
            Self::TooManyCategories(count) => {
                write!(f, "{count} active categories exceed limit {CATEGORY_LIMIT}")
            }
            Self::OverCapacity { category_id, load } => write!(
                f,
                "category {category_id} holds {load} points over capacity {COLUMN_CAPACITY}"
            ),
            Self::MultipleUrgent { category_id, count } => {
                write!(f, "category {category_id} has {count} urgent tasks")
            }
            Self::MultipleFocused(count) => write!(f, "{count} focused tasks"),
            Self::FocusedOffBoard(id) => write!(f, "task {id} is focused off the board"),
            Self::TaskSizeOutOfRange { task_id, size } => {
                write!(f, "task {task_id} has size {size}")
            }
        }
    }
}

/// Lists every invariant the board currently violates.
///
/// An empty result means the board is consistent.
pub fn audit(board: &BoardState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    let mut task_ids = HashSet::new();
    for task in board.tasks() {
        if !task_ids.insert(task.id.as_str()) {
            violations.push(InvariantViolation::DuplicateTaskId(task.id.clone()));
        }
        if !(MIN_TASK_SIZE..=MAX_TASK_SIZE).contains(&task.size) {
            violations.push(InvariantViolation::TaskSizeOutOfRange {
                task_id: task.id.clone(),
                size: task.size,
            });
        }
    }

    let mut category_ids = HashSet::new();
    let mut category_names = HashSet::new();
    for category in board.all_categories() {
        if !category_ids.insert(category.id.as_str()) {
            violations.push(InvariantViolation::DuplicateCategoryId(category.id.clone()));
        }
        if !category_names.insert(category.name.as_str()) {
            violations.push(InvariantViolation::DuplicateCategoryName(
                category.name.clone(),
            ));
        }
        let urgent = category.tasks.iter().filter(|task| task.urgent).count();
        if urgent > 1 {
            violations.push(InvariantViolation::MultipleUrgent {
                category_id: category.id.clone(),
                count: urgent,
            });
        }
    }

    if board.categories.len() > CATEGORY_LIMIT {
        violations.push(InvariantViolation::TooManyCategories(
            board.categories.len(),
        ));
    }
    for category in &board.categories {
        let load = category.load();
        if load > COLUMN_CAPACITY {
            violations.push(InvariantViolation::OverCapacity {
                category_id: category.id.clone(),
                load,
            });
        }
    }

    let focused = board.tasks().filter(|task| task.focused).count();
    if focused > 1 {
        violations.push(InvariantViolation::MultipleFocused(focused));
    }
    let on_board: HashSet<&str> = board
        .categories
        .iter()
        .flat_map(|category| category.tasks.iter())
        .map(|task| task.id.as_str())
        .collect();
    for task in board.tasks().filter(|task| task.focused) {
        if !on_board.contains(task.id.as_str()) {
            violations.push(InvariantViolation::FocusedOffBoard(task.id.clone()));
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::{audit, ensure_capacity, ensure_unique_name, normalize_urgent, InvariantViolation};
    use crate::engine::error::BoardError;
    use crate::model::board::BoardState;
    use crate::model::category::Category;
    use crate::model::task::{Task, TaskState};

    fn task(id: &str, size: u8) -> Task {
        Task::new(id, id, TaskState::Todo, size).unwrap()
    }

    #[test]
    fn capacity_allows_exactly_five_points() {
        let mut category = Category::new("c1", "Build");
        category.tasks = vec![task("a", 2), task("b", 3)];
        assert!(ensure_capacity(&category).is_ok());

        category.tasks.push(task("c", 1));
        assert!(matches!(
            ensure_capacity(&category),
            Err(BoardError::CapacityExceeded { load: 6, .. })
        ));
    }

    #[test]
    fn unique_name_ignores_the_renamed_category_itself() {
        let mut board = BoardState::default();
        board.categories.push(Category::new("c1", "Build"));
        board.category_archives.push(Category::new("c2", "Old"));

        assert!(ensure_unique_name(&board, "Build", Some("c1")).is_ok());
        assert!(ensure_unique_name(&board, "build", None).is_ok());
        assert!(matches!(
            ensure_unique_name(&board, "Old", Some("c1")),
            Err(BoardError::DuplicateCategory(name)) if name == "Old"
        ));
    }

    #[test]
    fn normalize_urgent_keeps_only_the_named_task() {
        let mut category = Category::new("c1", "Build");
        category.tasks = vec![task("a", 1), task("b", 1)];
        category.tasks[0].urgent = true;
        category.tasks[1].urgent = true;

        normalize_urgent(&mut category, "b");
        assert!(!category.tasks[0].urgent);
        assert!(category.tasks[1].urgent);
    }

    #[test]
    fn audit_reports_focus_off_board_and_over_capacity() {
        let mut board = BoardState::default();
        let mut category = Category::new("c1", "Build");
        category.tasks = vec![task("a", 3), task("b", 3)];
        board.categories.push(category);
        let mut parked = task("p", 1);
        parked.focused = true;
        board.backburner.push(parked);

        let violations = audit(&board);
        assert!(violations.contains(&InvariantViolation::OverCapacity {
            category_id: "c1".to_string(),
            load: 6,
        }));
        assert!(violations.contains(&InvariantViolation::FocusedOffBoard("p".to_string())));
    }
}
