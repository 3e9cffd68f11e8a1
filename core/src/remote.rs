//! The remote todo service seam and its HTTP implementation.
//!
//! # Design
//! `RemoteTodoService` is the contract the controller depends on. The HTTP
//! implementation pairs the stateless `TodoClient` with a `Transport`, so the
//! request/response handling stays pure and only `execute` touches the
//! network. `UreqTransport` runs the blocking ureq agent on Tokio's blocking
//! pool; callers never block on a round-trip.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::client::TodoClient;
use crate::config::ClientConfig;
use crate::error::{Operation, RemoteError, TransportError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, Todo, TodoId, UpdateTodo};

/// The system of record for todos. Every call may fail with `RemoteError`.
#[async_trait]
pub trait RemoteTodoService: Send + Sync {
    async fn list(&self) -> Result<Vec<Todo>, RemoteError>;

    async fn create(&self, title: &str) -> Result<Todo, RemoteError>;

    async fn update(&self, id: &TodoId, changes: &UpdateTodo) -> Result<Todo, RemoteError>;

    async fn delete(&self, id: &TodoId) -> Result<(), RemoteError>;
}

/// Executes a built request and hands back the raw response.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// `RemoteTodoService` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTodoService<T = UreqTransport> {
    client: TodoClient,
    transport: T,
}

impl HttpTodoService<UreqTransport> {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(TodoClient::new(&config.base_url), UreqTransport::new(config.timeout))
    }
}

impl<T: Transport> HttpTodoService<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self { client, transport }
    }

    async fn round_trip(&self, operation: Operation, request: HttpRequest) -> Result<HttpResponse, RemoteError> {
        debug!(%operation, method = ?request.method, path = %request.path, "sending request");
        let response = self
            .transport
            .execute(request)
            .await
            .map_err(|e| RemoteError::new(operation, e.to_string()))?;
        debug!(%operation, status = response.status, "received response");
        Ok(response)
    }
}

#[async_trait]
impl<T: Transport> RemoteTodoService for HttpTodoService<T> {
    async fn list(&self) -> Result<Vec<Todo>, RemoteError> {
        let request = self.client.build_list_todos();
        let response = self.round_trip(Operation::List, request).await?;
        self.client.parse_list_todos(response)
    }

    async fn create(&self, title: &str) -> Result<Todo, RemoteError> {
        let input = CreateTodo {
            title: title.to_string(),
        };
        let request = self.client.build_create_todo(&input)?;
        let response = self.round_trip(Operation::Create, request).await?;
        self.client.parse_create_todo(response)
    }

    async fn update(&self, id: &TodoId, changes: &UpdateTodo) -> Result<Todo, RemoteError> {
        let request = self.client.build_update_todo(id, changes)?;
        let response = self.round_trip(Operation::Update, request).await?;
        self.client.parse_update_todo(response)
    }

    async fn delete(&self, id: &TodoId) -> Result<(), RemoteError> {
        let request = self.client.build_delete_todo(id);
        let response = self.round_trip(Operation::Delete, request).await?;
        self.client.parse_delete_todo(response)
    }
}

/// Blocking ureq agent driven from Tokio's blocking pool.
///
/// Status codes are returned as data rather than `Err`, leaving status
/// interpretation to `TodoClient`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || execute_blocking(&agent, request))
            .await
            .map_err(|e| TransportError(e.to_string()))?
            .map_err(|e| TransportError(e.to_string()))
    }
}

fn execute_blocking(agent: &ureq::Agent, request: HttpRequest) -> Result<HttpResponse, ureq::Error> {
    let content_type = request
        .headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
        .map(|(_, value)| value.as_str())
        .unwrap_or("application/json");

    let mut response = match (request.method, request.body.as_deref()) {
        (HttpMethod::Get, _) => agent.get(&request.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&request.path).call(),
        (HttpMethod::Post, Some(body)) => agent
            .post(&request.path)
            .content_type(content_type)
            .send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(&request.path).send_empty(),
        (HttpMethod::Put, Some(body)) => agent
            .put(&request.path)
            .content_type(content_type)
            .send(body.as_bytes()),
        (HttpMethod::Put, None) => agent.put(&request.path).send_empty(),
    }?;

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string()?;

    Ok(HttpResponse {
        status,
        headers: Vec::new(),
        body,
    })
}
