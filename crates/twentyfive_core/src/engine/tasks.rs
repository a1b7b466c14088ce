//! Task placement and task-level board operations.
//!
//! # Invariants
//! - Lookup order is active categories, then backburner, then archive.
//!   Tasks inside parked categories travel with their category and are not
//!   individually addressable.
//! - A moved task is either at its target or back at its exact original
//!   address; never lost, never duplicated.

use crate::engine::error::{BoardError, BoardResult};
use crate::engine::invariants::{
    clear_focus, normalize_focus, normalize_urgent, COLUMN_CAPACITY,
};
use crate::engine::Rejected;
use crate::model::board::BoardState;
use crate::model::location::{insertion_index, TaskAddress, TaskLocationKind, TaskTarget};
use crate::model::task::{validate_size, Task, TaskPatch};

/// Move destination plus optional explicit parking provenance.
///
/// When both provenance fields are `None`, a task leaving an active category
/// for backburner/archive records that category as its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDestination {
    pub target: TaskTarget,
    pub source_id: Option<String>,
    pub source: Option<String>,
}

impl TaskDestination {
    pub fn new(target: TaskTarget) -> Self {
        Self {
            target,
            source_id: None,
            source: None,
        }
    }
}

impl BoardState {
    /// Locates an addressable task.
    pub fn find_task(&self, task_id: &str) -> Option<TaskAddress> {
        for (category_index, category) in self.categories.iter().enumerate() {
            if let Some(task_index) = category.task_index(task_id) {
                return Some(TaskAddress::Category {
                    category_index,
                    task_index,
                });
            }
        }
        if let Some(index) = self.backburner.iter().position(|task| task.id == task_id) {
            return Some(TaskAddress::Backburner(index));
        }
        self.archives
            .iter()
            .position(|task| task.id == task_id)
            .map(TaskAddress::Archive)
    }

    /// Task stored at `address`, if the address is still valid.
    pub fn task_at(&self, address: TaskAddress) -> Option<&Task> {
        match address {
            TaskAddress::Category {
                category_index,
                task_index,
            } => self
                .categories
                .get(category_index)
                .and_then(|category| category.tasks.get(task_index)),
            TaskAddress::Backburner(index) => self.backburner.get(index),
            TaskAddress::Archive(index) => self.archives.get(index),
        }
    }

    fn task_at_mut(&mut self, address: TaskAddress) -> Option<&mut Task> {
        match address {
            TaskAddress::Category {
                category_index,
                task_index,
            } => self
                .categories
                .get_mut(category_index)
                .and_then(|category| category.tasks.get_mut(task_index)),
            TaskAddress::Backburner(index) => self.backburner.get_mut(index),
            TaskAddress::Archive(index) => self.archives.get_mut(index),
        }
    }

    /// Looks up a task by id.
    ///
    /// # Errors
    /// - `TaskNotFound` when no addressable container holds the id.
    pub fn get_task(&self, task_id: &str) -> BoardResult<(&Task, TaskAddress)> {
        self.find_task(task_id)
            .and_then(|address| self.task_at(address).map(|task| (task, address)))
            .ok_or_else(|| BoardError::TaskNotFound(task_id.to_string()))
    }

    /// Removes a task from its container, compacting the sequence.
    ///
    /// Returns the task and the address it occupied.
    pub fn detach_task(&mut self, task_id: &str) -> BoardResult<(Task, TaskAddress)> {
        let address = self
            .find_task(task_id)
            .ok_or_else(|| BoardError::TaskNotFound(task_id.to_string()))?;
        let task = match address {
            TaskAddress::Category {
                category_index,
                task_index,
            } => self.categories[category_index].tasks.remove(task_index),
            TaskAddress::Backburner(index) => self.backburner.remove(index),
            TaskAddress::Archive(index) => self.archives.remove(index),
        };
        Ok((task, address))
    }

    /// Puts a detached task back exactly where [`BoardState::detach_task`]
    /// found it.
    pub fn reattach_task(&mut self, task: Task, address: TaskAddress) {
        match address {
            TaskAddress::Category {
                category_index,
                task_index,
            } => {
                let tasks = &mut self.categories[category_index].tasks;
                let index = insertion_index(Some(task_index), tasks.len());
                tasks.insert(index, task);
            }
            TaskAddress::Backburner(index) => {
                let index = insertion_index(Some(index), self.backburner.len());
                self.backburner.insert(index, task);
            }
            TaskAddress::Archive(index) => {
                let index = insertion_index(Some(index), self.archives.len());
                self.archives.insert(index, task);
            }
        }
    }

    /// Inserts a task at `target`, enforcing capacity for active categories.
    ///
    /// Entering a category clears parking provenance and, when the task is
    /// urgent, makes it the category's only urgent task. Entering
    /// backburner/archive drops the urgent and focused flags.
    ///
    /// # Errors
    /// On rejection the untouched task is handed back in [`Rejected`].
    pub fn attach_task(
        &mut self,
        mut task: Task,
        target: &TaskTarget,
    ) -> Result<TaskAddress, Rejected<Task>> {
        match target {
            TaskTarget::Category {
                category_id,
                position,
            } => {
                let Some(category_index) = self
                    .categories
                    .iter()
                    .position(|category| &category.id == category_id)
                else {
                    let error = BoardError::CategoryNotFound(category_id.clone());
                    return Err(Rejected::new(task, error));
                };
                let category = &mut self.categories[category_index];
                let load = category.load() + u32::from(task.size);
                if load > COLUMN_CAPACITY {
                    let error = BoardError::CapacityExceeded {
                        category_id: category_id.clone(),
                        load,
                    };
                    return Err(Rejected::new(task, error));
                }

                task.clear_source();
                let task_index = insertion_index(*position, category.tasks.len());
                let urgent_id = task.urgent.then(|| task.id.clone());
                category.tasks.insert(task_index, task);
                if let Some(urgent_id) = urgent_id {
                    normalize_urgent(category, &urgent_id);
                }
                Ok(TaskAddress::Category {
                    category_index,
                    task_index,
                })
            }
            TaskTarget::Backburner { position } => {
                task.park();
                let index = insertion_index(*position, self.backburner.len());
                self.backburner.insert(index, task);
                Ok(TaskAddress::Backburner(index))
            }
            TaskTarget::Archive { position } => {
                task.park();
                let index = insertion_index(*position, self.archives.len());
                self.archives.insert(index, task);
                Ok(TaskAddress::Archive(index))
            }
        }
    }

    /// Inserts a brand-new task.
    ///
    /// # Errors
    /// - `InvalidRequest` when the id is empty or already used.
    /// - `InvalidTaskSize` for sizes outside `[1, 5]`.
    /// - `CategoryNotFound` / `CapacityExceeded` from placement.
    pub fn create_task(&mut self, task: Task, target: &TaskTarget) -> BoardResult<Task> {
        if task.id.is_empty() {
            return Err(BoardError::invalid_request("task id must not be empty"));
        }
        if self.contains_task(&task.id) {
            return Err(BoardError::invalid_request(format!(
                "task id {} already exists",
                task.id
            )));
        }
        validate_size(task.size)?;

        let focused = task.focused && target.kind() == TaskLocationKind::Category;
        let task_id = task.id.clone();
        let address = self
            .attach_task(task, target)
            .map_err(|rejected| rejected.error)?;
        if focused {
            normalize_focus(self, &task_id);
        }
        self.cloned_task(address)
    }

    /// Applies a partial patch to a task in place.
    ///
    /// Capacity is checked against the patched size before anything is
    /// written; urgent is re-normalized when the task is categorized.
    /// Parked tasks never keep an urgent flag.
    pub fn update_task(&mut self, task_id: &str, patch: &TaskPatch) -> BoardResult<Task> {
        let (current, address) = self.get_task(task_id)?;
        let mut updated = current.clone();
        patch.apply(&mut updated)?;
        if address.kind() != TaskLocationKind::Category {
            updated.park();
        }

        if let TaskAddress::Category { category_index, .. } = address {
            let category = &self.categories[category_index];
            let load = category.load() - u32::from(current.size) + u32::from(updated.size);
            if load > COLUMN_CAPACITY {
                return Err(BoardError::CapacityExceeded {
                    category_id: category.id.clone(),
                    load,
                });
            }
        }

        let urgent = updated.urgent;
        if let Some(slot) = self.task_at_mut(address) {
            *slot = updated;
        }
        if let (TaskAddress::Category { category_index, .. }, true) = (address, urgent) {
            normalize_urgent(&mut self.categories[category_index], task_id);
        }
        self.cloned_task(address)
    }

    /// Relocates a task, restoring its original address on failure.
    ///
    /// The task always loses focus. Parking provenance is taken from the
    /// destination when given, otherwise from the category the task leaves;
    /// a task moving between backburner and archive keeps what it had.
    pub fn move_task(&mut self, task_id: &str, destination: &TaskDestination) -> BoardResult<Task> {
        let (original, origin) = self.detach_task(task_id)?;

        let mut task = original.clone();
        task.focused = false;
        if destination.target.kind() != TaskLocationKind::Category {
            if destination.source_id.is_some() || destination.source.is_some() {
                task.source_id = destination.source_id.clone();
                task.source = destination.source.clone();
            } else if let TaskAddress::Category { category_index, .. } = origin {
                let category = &self.categories[category_index];
                task.source_id = Some(category.id.clone());
                task.source = Some(category.name.clone());
            }
        }

        match self.attach_task(task, &destination.target) {
            Ok(address) => self.cloned_task(address),
            Err(rejected) => {
                self.reattach_task(original, origin);
                Err(rejected.error)
            }
        }
    }

    /// Permanently removes an archived task.
    ///
    /// # Errors
    /// - `NotArchived` when the task lives anywhere but the archive.
    pub fn delete_task(&mut self, task_id: &str) -> BoardResult<Task> {
        let (_, address) = self.get_task(task_id)?;
        match address {
            TaskAddress::Archive(index) => Ok(self.archives.remove(index)),
            _ => Err(BoardError::NotArchived(task_id.to_string())),
        }
    }

    /// Focuses one task board-wide, or clears focus when `task_id` is `None`.
    ///
    /// # Errors
    /// - `TaskNotFound` for unknown ids.
    /// - `InvalidLocation` for tasks outside the active board.
    pub fn set_focused(&mut self, task_id: Option<&str>) -> BoardResult<Option<Task>> {
        let Some(task_id) = task_id.filter(|id| !id.is_empty()) else {
            clear_focus(self);
            return Ok(None);
        };

        let (_, address) = self.get_task(task_id)?;
        if address.kind() != TaskLocationKind::Category {
            return Err(BoardError::InvalidLocation(address.kind().to_string()));
        }
        normalize_focus(self, task_id);
        self.cloned_task(address).map(Some)
    }

    fn cloned_task(&self, address: TaskAddress) -> BoardResult<Task> {
        self.task_at(address)
            .cloned()
            .ok_or_else(|| BoardError::invalid_request("task address no longer valid"))
    }
}
