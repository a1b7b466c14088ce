//! Category placement and category-level board operations.
//!
//! # Invariants
//! - Lookup order is board, then backburner, then archive.
//! - Admission to the board checks the ceiling and the category's own
//!   capacity before anything is inserted.
//! - Leaving the board clears focus on the category's tasks; urgent flags
//!   travel with the category unchanged.

use crate::engine::error::{BoardError, BoardResult};
use crate::engine::invariants::{
    clear_category_focus, ensure_board_has_room, ensure_capacity, ensure_unique_name,
};
use crate::engine::Rejected;
use crate::model::board::BoardState;
use crate::model::category::Category;
use crate::model::location::{
    insertion_index, CategoryAddress, CategoryLocationKind, CategoryTarget,
};
use std::collections::HashSet;

impl BoardState {
    /// Locates a category in any of the three category containers.
    pub fn find_category(&self, category_id: &str) -> Option<CategoryAddress> {
        let position = |categories: &[Category]| {
            categories
                .iter()
                .position(|category| category.id == category_id)
        };
        position(self.categories.as_slice())
            .map(CategoryAddress::Board)
            .or_else(|| {
                position(self.category_backburner.as_slice()).map(CategoryAddress::Backburner)
            })
            .or_else(|| position(self.category_archives.as_slice()).map(CategoryAddress::Archive))
    }

    /// Category stored at `address`, if the address is still valid.
    pub fn category_at(&self, address: CategoryAddress) -> Option<&Category> {
        self.category_container(address.kind()).get(address.index())
    }

    fn category_container(&self, kind: CategoryLocationKind) -> &Vec<Category> {
        match kind {
            CategoryLocationKind::Board => &self.categories,
            CategoryLocationKind::Backburner => &self.category_backburner,
            CategoryLocationKind::Archive => &self.category_archives,
        }
    }

    fn category_container_mut(&mut self, kind: CategoryLocationKind) -> &mut Vec<Category> {
        match kind {
            CategoryLocationKind::Board => &mut self.categories,
            CategoryLocationKind::Backburner => &mut self.category_backburner,
            CategoryLocationKind::Archive => &mut self.category_archives,
        }
    }

    fn active_category_mut(&mut self, category_id: &str) -> BoardResult<&mut Category> {
        self.categories
            .iter_mut()
            .find(|category| category.id == category_id)
            .ok_or_else(|| BoardError::CategoryNotFound(category_id.to_string()))
    }

    /// Removes a category (with its tasks) from its container.
    pub fn detach_category(
        &mut self,
        category_id: &str,
    ) -> BoardResult<(Category, CategoryAddress)> {
        let address = self
            .find_category(category_id)
            .ok_or_else(|| BoardError::CategoryNotFound(category_id.to_string()))?;
        let category = self
            .category_container_mut(address.kind())
            .remove(address.index());
        Ok((category, address))
    }

    /// Puts a detached category back exactly where it was found.
    pub fn reattach_category(&mut self, category: Category, address: CategoryAddress) {
        let container = self.category_container_mut(address.kind());
        let index = insertion_index(Some(address.index()), container.len());
        container.insert(index, category);
    }

    /// Inserts a category at `target`.
    ///
    /// # Errors
    /// On rejection (`CategoryLimit`, `CapacityExceeded`) the untouched
    /// category is handed back in [`Rejected`].
    pub fn attach_category(
        &mut self,
        mut category: Category,
        target: CategoryTarget,
    ) -> Result<CategoryAddress, Rejected<Category>> {
        if target.kind == CategoryLocationKind::Board {
            let admission = ensure_board_has_room(self).and_then(|()| ensure_capacity(&category));
            if let Err(error) = admission {
                return Err(Rejected::new(category, error));
            }
        } else {
            clear_category_focus(&mut category);
        }

        let container = self.category_container_mut(target.kind);
        let index = insertion_index(target.position, container.len());
        container.insert(index, category);
        Ok(match target.kind {
            CategoryLocationKind::Board => CategoryAddress::Board(index),
            CategoryLocationKind::Backburner => CategoryAddress::Backburner(index),
            CategoryLocationKind::Archive => CategoryAddress::Archive(index),
        })
    }

    /// Appends a new empty category to the board.
    ///
    /// # Errors
    /// - `InvalidRequest` for a blank name.
    /// - `DuplicateCategory` when the trimmed name is taken anywhere.
    /// - `CategoryLimit` when the board is full.
    /// - `InvalidRequest` when the id is empty or already used.
    pub fn create_category(
        &mut self,
        id: impl Into<String>,
        name: &str,
    ) -> BoardResult<Category> {
        let id = id.into();
        if id.is_empty() {
            return Err(BoardError::invalid_request("category id must not be empty"));
        }
        if self.find_category(&id).is_some() {
            return Err(BoardError::invalid_request(format!(
                "category id {id} already exists"
            )));
        }
        let name = normalize_category_name(name)?;
        ensure_unique_name(self, &name, None)?;
        ensure_board_has_room(self)?;

        let category = Category::new(id, name);
        self.categories.push(category.clone());
        Ok(category)
    }

    /// Renames an active category.
    ///
    /// # Errors
    /// - `InvalidRequest` for a blank name.
    /// - `CategoryNotFound` when the id is not on the board.
    /// - `DuplicateCategory` when another category uses the name.
    pub fn rename_category(&mut self, category_id: &str, name: &str) -> BoardResult<Category> {
        let name = normalize_category_name(name)?;
        if !self.categories.iter().any(|category| category.id == category_id) {
            return Err(BoardError::CategoryNotFound(category_id.to_string()));
        }
        ensure_unique_name(self, &name, Some(category_id))?;

        let category = self.active_category_mut(category_id)?;
        category.name = name;
        Ok(category.clone())
    }

    /// Relocates a category, restoring its original address on failure.
    pub fn move_category(
        &mut self,
        category_id: &str,
        target: CategoryTarget,
    ) -> BoardResult<Category> {
        let (category, origin) = self.detach_category(category_id)?;
        match self.attach_category(category, target) {
            Ok(address) => self
                .category_at(address)
                .cloned()
                .ok_or_else(|| BoardError::CategoryNotFound(category_id.to_string())),
            Err(rejected) => {
                self.reattach_category(rejected.value, origin);
                Err(rejected.error)
            }
        }
    }

    /// Rewrites the task order of an active category.
    ///
    /// # Errors
    /// - `CategoryNotFound` when the id is not on the board.
    /// - `InvalidRequest` unless `order` is exactly the category's id set.
    pub fn reorder_category_tasks(
        &mut self,
        category_id: &str,
        order: &[String],
    ) -> BoardResult<Category> {
        let category = self.active_category_mut(category_id)?;
        if order.len() != category.tasks.len() {
            return Err(BoardError::invalid_request(format!(
                "task order lists {} ids, category holds {}",
                order.len(),
                category.tasks.len()
            )));
        }
        let mut seen = HashSet::new();
        if let Some(duplicate) = order.iter().find(|id| !seen.insert(id.as_str())) {
            return Err(BoardError::invalid_request(format!(
                "task id {duplicate} listed twice"
            )));
        }
        if let Some(missing) = category
            .tasks
            .iter()
            .find(|task| !seen.contains(task.id.as_str()))
        {
            return Err(BoardError::invalid_request(format!(
                "missing task id {}",
                missing.id
            )));
        }

        let mut remaining = std::mem::take(&mut category.tasks);
        for id in order {
            if let Some(index) = remaining.iter().position(|task| &task.id == id) {
                category.tasks.push(remaining.swap_remove(index));
            }
        }
        Ok(category.clone())
    }
}

fn normalize_category_name(name: &str) -> BoardResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(BoardError::invalid_request("category name must not be blank"));
    }
    Ok(trimmed.to_string())
}
