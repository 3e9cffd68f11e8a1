//! The synchronized client state and its transitions.
//!
//! # Design
//! Collection, loading flags, and the error slot live in one value. Every
//! transition is a plain method taking the result of a finished remote call,
//! so the state machine can be driven without any I/O. Only a load clears the
//! error slot; any failure overwrites it.

use std::collections::HashMap;

use crate::config::UpdateOrdering;
use crate::error::RemoteError;
use crate::store::TodoStore;
use crate::types::{Todo, TodoId};

pub const LOAD_FAILED: &str = "Failed to load todos. Please try again.";
pub const ADD_FAILED: &str = "Failed to add todo.";
pub const UPDATE_FAILED: &str = "Failed to update todo.";
pub const DELETE_FAILED: &str = "Failed to delete todo.";

/// What a finished call did to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// The call succeeded but its id was no longer in the collection.
    NoMatch,
    /// An update response older than one already applied; dropped.
    Stale,
    Failed,
}

/// Issue-order position of an update request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UpdateTicket(u64);

/// Starts out loading: nothing has been fetched yet.
#[derive(Debug, Clone)]
pub struct SyncState {
    todos: TodoStore,
    loading_initial: bool,
    adding_in_flight: bool,
    last_error: Option<String>,
    ordering: UpdateOrdering,
    next_ticket: u64,
    applied_tickets: HashMap<TodoId, UpdateTicket>,
}

impl Default for SyncState {
    fn default() -> Self {
        Self::new(UpdateOrdering::default())
    }
}

impl SyncState {
    pub fn new(ordering: UpdateOrdering) -> Self {
        Self {
            todos: TodoStore::default(),
            loading_initial: true,
            adding_in_flight: false,
            last_error: None,
            ordering,
            next_ticket: 0,
            applied_tickets: HashMap::new(),
        }
    }

    pub fn todos(&self) -> &TodoStore {
        &self.todos
    }

    pub fn loading_initial(&self) -> bool {
        self.loading_initial
    }

    pub fn adding_in_flight(&self) -> bool {
        self.adding_in_flight
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn ordering(&self) -> UpdateOrdering {
        self.ordering
    }

    pub fn begin_load(&mut self) {
        self.last_error = None;
        self.loading_initial = true;
    }

    pub fn finish_load(&mut self, result: Result<Vec<Todo>, RemoteError>) -> Outcome {
        self.loading_initial = false;
        match result {
            Ok(todos) => {
                self.todos.set_all(todos);
                let todos = &self.todos;
                self.applied_tickets.retain(|id, _| todos.get(id).is_some());
                Outcome::Applied
            }
            Err(_) => self.fail(LOAD_FAILED),
        }
    }

    pub fn begin_add(&mut self) {
        self.adding_in_flight = true;
    }

    pub fn finish_add(&mut self, result: Result<Todo, RemoteError>) -> Outcome {
        self.adding_in_flight = false;
        match result {
            Ok(todo) => {
                self.todos.prepend(todo);
                Outcome::Applied
            }
            Err(_) => self.fail(ADD_FAILED),
        }
    }

    /// Take the next ticket. Tickets only matter under `IssueOrder`.
    pub fn begin_update(&mut self) -> UpdateTicket {
        let ticket = UpdateTicket(self.next_ticket);
        self.next_ticket += 1;
        ticket
    }

    pub fn finish_update(
        &mut self,
        id: &TodoId,
        ticket: UpdateTicket,
        result: Result<Todo, RemoteError>,
    ) -> Outcome {
        let todo = match result {
            Ok(todo) => todo,
            Err(_) => return self.fail(UPDATE_FAILED),
        };

        if self.ordering == UpdateOrdering::IssueOrder {
            if self.applied_tickets.get(id).is_some_and(|applied| ticket < *applied) {
                return Outcome::Stale;
            }
            self.applied_tickets.insert(id.clone(), ticket);
        }

        if self.todos.replace(id, todo) {
            Outcome::Applied
        } else {
            Outcome::NoMatch
        }
    }

    pub fn finish_delete(&mut self, id: &TodoId, result: Result<(), RemoteError>) -> Outcome {
        if result.is_err() {
            return self.fail(DELETE_FAILED);
        }
        self.applied_tickets.remove(id);
        if self.todos.remove_by_id(id) {
            Outcome::Applied
        } else {
            Outcome::NoMatch
        }
    }

    fn fail(&mut self, message: &str) -> Outcome {
        self.last_error = Some(message.to_string());
        Outcome::Failed
    }
}
