//! Ordered in-memory view of the remote todo collection.
//!
//! All transitions are synchronous and infallible. A missing id on
//! `replace` or `remove_by_id` is a no-op reported through the `bool` return.

use std::collections::HashSet;

use tracing::warn;

use crate::types::{Todo, TodoId};

/// Todos in display order, newest created first. Ids are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoStore {
    todos: Vec<Todo>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection, keeping the given order.
    ///
    /// Should the service ever repeat an id, the first occurrence wins.
    pub fn set_all(&mut self, todos: Vec<Todo>) {
        let mut seen = HashSet::with_capacity(todos.len());
        self.todos = todos
            .into_iter()
            .filter(|todo| {
                let fresh = seen.insert(todo.id.clone());
                if !fresh {
                    warn!(id = %todo.id, "dropping duplicate todo from listing");
                }
                fresh
            })
            .collect();
    }

    /// Insert at the front. An existing entry with the same id is dropped.
    pub fn prepend(&mut self, todo: Todo) {
        self.todos.retain(|existing| existing.id != todo.id);
        self.todos.insert(0, todo);
    }

    /// Swap in `todo` where `id` currently sits. Returns `false` if absent.
    pub fn replace(&mut self, id: &TodoId, todo: Todo) -> bool {
        match self.todos.iter_mut().find(|existing| &existing.id == id) {
            Some(slot) => {
                *slot = todo;
                true
            }
            None => false,
        }
    }

    /// Returns `false` if no todo had this id.
    pub fn remove_by_id(&mut self, id: &TodoId) -> bool {
        let before = self.todos.len();
        self.todos.retain(|existing| &existing.id != id);
        self.todos.len() != before
    }

    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| &todo.id == id)
    }

    pub fn as_slice(&self) -> &[Todo] {
        &self.todos
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Todo> {
        self.todos.iter()
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|todo| todo.completed).count()
    }
}

impl<'a> IntoIterator for &'a TodoStore {
    type Item = &'a Todo;
    type IntoIter = std::slice::Iter<'a, Todo>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
