//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Any status outside 2xx is a failure; the exact success code is not checked.

use serde::de::DeserializeOwned;

use crate::error::{Operation, RemoteError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, Todo, TodoId, UpdateTodo};

/// Request builder and response parser for the `/todos` resource.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    /// `base_url` includes the API prefix, e.g. `http://127.0.0.1:8080/api`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/todos", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, RemoteError> {
        let body = serde_json::to_string(input)
            .map_err(|e| RemoteError::new(Operation::Create, format!("encode: {e}")))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/todos", self.base_url),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_update_todo(&self, id: &TodoId, input: &UpdateTodo) -> Result<HttpRequest, RemoteError> {
        let body = serde_json::to_string(input)
            .map_err(|e| RemoteError::new(Operation::Update, format!("encode: {e}")))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/todos/{id}", self.base_url),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_delete_todo(&self, id: &TodoId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/todos/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, RemoteError> {
        decode(Operation::List, response)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, RemoteError> {
        decode(Operation::Create, response)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, RemoteError> {
        decode(Operation::Update, response)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), RemoteError> {
        check_status(Operation::Delete, &response)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn check_status(operation: Operation, response: &HttpResponse) -> Result<(), RemoteError> {
    if response.is_success() {
        return Ok(());
    }
    Err(RemoteError::status(operation, response.status, &response.body))
}

fn decode<T: DeserializeOwned>(operation: Operation, response: HttpResponse) -> Result<T, RemoteError> {
    check_status(operation, &response)?;
    serde_json::from_str(&response.body).map_err(|e| RemoteError::new(operation, format!("decode: {e}")))
}
