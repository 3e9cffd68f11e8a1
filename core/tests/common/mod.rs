//! Shared fixtures for the controller tests.

#![allow(dead_code)]

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use tokio::sync::oneshot;
use todo_sync::{Operation, RemoteError, RemoteTodoService, Todo, TodoId, UpdateTodo};

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
}

pub fn todo(id: &str, title: &str, completed: bool) -> Todo {
    Todo {
        id: TodoId::from(id),
        title: title.to_string(),
        completed,
        created_at: base_time(),
        updated_at: base_time(),
    }
}

pub fn ids(todos: &[Todo]) -> Vec<&str> {
    todos.iter().map(|t| t.id.as_str()).collect()
}

/// In-memory service that behaves like the real one unless told to fail or
/// to hold a response back.
#[derive(Default)]
pub struct FakeService {
    todos: Mutex<Vec<Todo>>,
    next_id: AtomicU64,
    failing: Mutex<HashSet<Operation>>,
    calls: Mutex<Vec<Operation>>,
    create_gate: Mutex<Option<oneshot::Receiver<()>>>,
    list_gate: Mutex<Option<oneshot::Receiver<()>>>,
    update_gates: Mutex<VecDeque<oneshot::Receiver<Result<Todo, RemoteError>>>>,
}

impl FakeService {
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        let service = Self::default();
        *service.todos.lock().unwrap() = todos;
        service
    }

    pub fn fail(&self, operation: Operation) {
        self.failing.lock().unwrap().insert(operation);
    }

    pub fn recover(&self, operation: Operation) {
        self.failing.lock().unwrap().remove(&operation);
    }

    /// What the service currently stores, newest first.
    pub fn list_snapshot(&self) -> Vec<Todo> {
        self.todos.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<Operation> {
        self.calls.lock().unwrap().clone()
    }

    /// The next create waits until the returned sender fires.
    pub fn hold_create(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.create_gate.lock().unwrap() = Some(rx);
        tx
    }

    /// The next list waits until the returned sender fires.
    pub fn hold_list(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.list_gate.lock().unwrap() = Some(rx);
        tx
    }

    /// The next update answers with whatever is sent on the returned sender.
    pub fn script_update(&self) -> oneshot::Sender<Result<Todo, RemoteError>> {
        let (tx, rx) = oneshot::channel();
        self.update_gates.lock().unwrap().push_back(rx);
        tx
    }

    fn record(&self, operation: Operation) -> Result<(), RemoteError> {
        self.calls.lock().unwrap().push(operation);
        if self.failing.lock().unwrap().contains(&operation) {
            return Err(RemoteError::new(operation, "HTTP 500: internal error"));
        }
        Ok(())
    }
}

async fn wait(gate: Option<oneshot::Receiver<()>>) {
    if let Some(rx) = gate {
        let _ = rx.await;
    }
}

#[async_trait]
impl RemoteTodoService for FakeService {
    async fn list(&self) -> Result<Vec<Todo>, RemoteError> {
        let gate = self.list_gate.lock().unwrap().take();
        wait(gate).await;
        self.record(Operation::List)?;
        Ok(self.todos.lock().unwrap().clone())
    }

    async fn create(&self, title: &str) -> Result<Todo, RemoteError> {
        let gate = self.create_gate.lock().unwrap().take();
        wait(gate).await;
        self.record(Operation::Create)?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let at = base_time() + Duration::minutes(n as i64);
        let todo = Todo {
            id: TodoId::from(format!("srv-{n}")),
            title: title.trim().to_string(),
            completed: false,
            created_at: at,
            updated_at: at,
        };
        self.todos.lock().unwrap().insert(0, todo.clone());
        Ok(todo)
    }

    async fn update(&self, id: &TodoId, changes: &UpdateTodo) -> Result<Todo, RemoteError> {
        let gate = self.update_gates.lock().unwrap().pop_front();
        if let Some(rx) = gate {
            self.calls.lock().unwrap().push(Operation::Update);
            return rx
                .await
                .unwrap_or_else(|_| Err(RemoteError::new(Operation::Update, "dropped")));
        }

        self.record(Operation::Update)?;
        let mut todos = self.todos.lock().unwrap();
        let todo = todos
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| RemoteError::new(Operation::Update, "HTTP 404"))?;
        if let Some(title) = &changes.title {
            todo.title = title.clone();
        }
        if let Some(completed) = changes.completed {
            todo.completed = completed;
        }
        todo.updated_at += Duration::seconds(1);
        Ok(todo.clone())
    }

    async fn delete(&self, id: &TodoId) -> Result<(), RemoteError> {
        self.record(Operation::Delete)?;
        let mut todos = self.todos.lock().unwrap();
        let before = todos.len();
        todos.retain(|t| &t.id != id);
        if todos.len() == before {
            return Err(RemoteError::new(Operation::Delete, "HTTP 404"));
        }
        Ok(())
    }
}
