//! Client-side synchronization core for the todo service.
//!
//! # Overview
//! Mirrors the remote todo collection in memory and turns user intents
//! (load, add, toggle, edit, delete) into remote calls whose results are
//! folded back into local state.
//!
//! # Design
//! - `TodoClient` builds `HttpRequest` values and parses `HttpResponse`
//!   values without touching the network (host-does-IO pattern); a
//!   `Transport` executes the round-trip between the two.
//! - `RemoteTodoService` is the async seam the controller depends on;
//!   `HttpTodoService` implements it over `TodoClient` + `Transport`.
//! - `SyncState` holds the `TodoStore`, loading flags, and error slot, with
//!   pure transitions applied when a call completes.
//! - `SyncController` owns the state and the service and runs the actions.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod remote;
pub mod state;
pub mod store;
pub mod types;

pub use client::TodoClient;
pub use config::{ClientConfig, UpdateOrdering};
pub use controller::{Intent, SyncController};
pub use error::{ConfigError, Operation, RemoteError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use remote::{HttpTodoService, RemoteTodoService, Transport, UreqTransport};
pub use state::{Outcome, SyncState};
pub use store::TodoStore;
pub use types::{CreateTodo, Todo, TodoId, TodoTitle, UpdateTodo};
