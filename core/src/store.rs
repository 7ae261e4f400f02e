//! The ordered todo collection and its mutation rules.
//!
//! # Design
//! `ItemStore` is the only owner of the collection. Every mutation goes
//! through `add`, `update`, `toggle` or `remove`; nothing hands out a mutable
//! reference to an item. Mutations addressed to an absent id are silent
//! no-ops reported through the return value, never errors.

use tracing::{debug, warn};

use crate::error::ValidationError;
use crate::ids::{IdGenerator, SequentialIds};
use crate::types::{Draft, TodoId, TodoItem};

pub struct ItemStore {
    items: Vec<TodoItem>,
    ids: Box<dyn IdGenerator>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::with_generator(Box::new(SequentialIds::new()))
    }

    pub fn with_generator(ids: Box<dyn IdGenerator>) -> Self {
        Self {
            items: Vec::new(),
            ids,
        }
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn position(&self, id: TodoId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn contains(&self, id: TodoId) -> bool {
        self.position(id).is_some()
    }

    /// Flip `completed` on the item with `id`. Returns `false` if absent.
    pub fn toggle(&mut self, id: TodoId) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.completed = !item.completed;
                debug!(%id, completed = item.completed, "toggled item");
                true
            }
            None => {
                debug!(%id, "toggle ignored, no such item");
                false
            }
        }
    }

    /// Validate `draft` and append it under a fresh id.
    pub fn add(&mut self, draft: &Draft) -> Result<TodoId, ValidationError> {
        draft.validate()?;

        let id = self.fresh_id();
        self.items.push(TodoItem {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            completed: draft.completed,
        });
        debug!(%id, len = self.items.len(), "added item");
        Ok(id)
    }

    /// Validate `draft` and overwrite the fields of `id` in place.
    ///
    /// `completed` is taken from the draft like the other fields. Returns
    /// `Ok(false)` when `id` is not in the collection.
    pub fn update(&mut self, id: TodoId, draft: &Draft) -> Result<bool, ValidationError> {
        draft.validate()?;

        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.title = draft.title.clone();
                item.description = draft.description.clone();
                item.completed = draft.completed;
                debug!(%id, completed = item.completed, "updated item");
                Ok(true)
            }
            None => {
                warn!(%id, "update ignored, no such item");
                Ok(false)
            }
        }
    }

    /// Remove the item with `id`, returning it if it was present.
    pub fn remove(&mut self, id: TodoId) -> Option<TodoItem> {
        let index = self.position(id)?;
        let removed = self.items.remove(index);
        debug!(%id, len = self.items.len(), "removed item");
        Some(removed)
    }

    fn fresh_id(&mut self) -> TodoId {
        loop {
            let candidate = self.ids.next_id();
            if !self.contains(candidate) {
                return candidate;
            }
            warn!(id = %candidate, "generated id already in use, drawing another");
        }
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ItemStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemStore").field("items", &self.items).finish_non_exhaustive()
    }
}
