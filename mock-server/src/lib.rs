//! In-memory stand-in for the remote todo service.
//!
//! Serves the `/api/todos` contract the sync client talks to: the server
//! assigns ids and timestamps, lists newest first, and trims titles.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: String,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

/// Stored todos plus the insertion counter that breaks `created_at` ties.
#[derive(Default)]
pub struct Store {
    todos: HashMap<Uuid, (u64, Todo)>,
    next_seq: u64,
}

impl Store {
    fn insert(&mut self, todo: Todo) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.todos.insert(todo.id, (seq, todo));
    }

    /// Newest first, by `created_at` and then by insertion order.
    fn newest_first(&self) -> Vec<Todo> {
        let mut entries: Vec<&(u64, Todo)> = self.todos.values().collect();
        entries.sort_by(|(a_seq, a), (b_seq, b)| {
            b.created_at.cmp(&a.created_at).then(b_seq.cmp(a_seq))
        });
        entries.into_iter().map(|(_, todo)| todo.clone()).collect()
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with_db(Db::default())
}

/// Build the router over an existing store.
pub fn app_with_db(db: Db) -> Router {
    let todos = Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo)
                .put(update_todo)
                .patch(update_todo)
                .delete(delete_todo),
        )
        .with_state(db);
    Router::new().nest("/api", todos)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock todo service listening");
    }
    axum::serve(listener, app()).await
}

/// Status plus a plain-text message, as the real service answers errors.
pub type ApiError = (StatusCode, String);

fn bad_request(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, message.to_string())
}

fn not_found() -> ApiError {
    (StatusCode::NOT_FOUND, "Todo not found".to_string())
}

/// Trim a title, rejecting blank input the way the real service does.
fn clean_title(raw: &str) -> Result<String, ApiError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(bad_request("Title cannot be empty"));
    }
    Ok(title.to_string())
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| bad_request("Invalid ID format"))
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    let store = db.read().await;
    Json(store.newest_first())
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let title = clean_title(&input.title)?;
    let now = Utc::now();
    let todo = Todo {
        id: Uuid::new_v4(),
        title,
        completed: false,
        created_at: now,
        updated_at: now,
    };
    db.write().await.insert(todo.clone());
    debug!(id = %todo.id, "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    let store = db.read().await;
    store
        .todos
        .get(&id)
        .map(|(_, todo)| Json(todo.clone()))
        .ok_or_else(not_found)
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    let title = input.title.as_deref().map(clean_title).transpose()?;
    let mut store = db.write().await;
    let (_, todo) = store.todos.get_mut(&id).ok_or_else(not_found)?;
    if let Some(title) = title {
        todo.title = title;
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    todo.updated_at = Utc::now();
    debug!(%id, "updated todo");
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    let mut store = db.write().await;
    store
        .todos
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(not_found)
}
