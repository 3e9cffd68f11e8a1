//! Error types for the todo sync client.
//!
//! # Design
//! Every failed remote call surfaces as a single `RemoteError`, whether the
//! transport broke, the status was outside 2xx, or the body did not decode.
//! The error keeps the operation and a readable detail for logs, but callers
//! are not expected to branch on either.

use std::fmt;

use thiserror::Error;

/// The remote operation a `RemoteError` came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// A remote call that did not succeed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{operation} request failed: {detail}")]
pub struct RemoteError {
    operation: Operation,
    detail: String,
}

impl RemoteError {
    pub fn new(operation: Operation, detail: impl Into<String>) -> Self {
        Self {
            operation,
            detail: detail.into(),
        }
    }

    pub(crate) fn status(operation: Operation, status: u16, body: &str) -> Self {
        if body.is_empty() {
            Self::new(operation, format!("HTTP {status}"))
        } else {
            Self::new(operation, format!("HTTP {status}: {body}"))
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

/// The transport could not complete an HTTP round-trip.
#[derive(Debug, Error)]
#[error("transport error: {0}")]
pub struct TransportError(pub String);

/// Invalid client configuration in the environment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("base url must not be empty")]
    EmptyBaseUrl,

    #[error("invalid timeout {0:?}: expected whole seconds")]
    InvalidTimeout(String),

    #[error("invalid update ordering {0:?}: expected \"arrival\" or \"issue\"")]
    InvalidOrdering(String),
}
