//! Client configuration read from the environment.

use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const BASE_URL_VAR: &str = "TODO_API_URL";
pub const TIMEOUT_VAR: &str = "TODO_API_TIMEOUT_SECS";
pub const ORDERING_VAR: &str = "TODO_UPDATE_ORDERING";

/// How update responses for the same todo are reconciled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UpdateOrdering {
    /// The response that arrives last wins, even if its request was older.
    #[default]
    ArrivalOrder,
    /// Responses to requests issued before an already-applied one are dropped.
    IssueOrder,
}

impl FromStr for UpdateOrdering {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arrival" => Ok(UpdateOrdering::ArrivalOrder),
            "issue" => Ok(UpdateOrdering::IssueOrder),
            _ => Err(ConfigError::InvalidOrdering(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service root including the API prefix.
    pub base_url: String,
    /// Applied by the HTTP transport to each round-trip.
    pub timeout: Duration,
    pub update_ordering: UpdateOrdering,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            update_ordering: UpdateOrdering::default(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key/value source; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup(BASE_URL_VAR) {
            let url = url.trim();
            if url.is_empty() {
                return Err(ConfigError::EmptyBaseUrl);
            }
            config.base_url = url.to_string();
        }
        if let Some(secs) = lookup(TIMEOUT_VAR) {
            let secs: u64 = secs
                .trim()
                .parse()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout(secs.clone()))?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(ordering) = lookup(ORDERING_VAR) {
            config.update_ordering = ordering.parse()?;
        }

        Ok(config)
    }
}
