use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Ticket;

/// Backlog shipped with the binary.
const EMBEDDED_BACKLOG: &str = include_str!("../../data/backlog.json");

/// Errors raised while loading a backlog.
#[derive(Debug, Error)]
pub enum BacklogError {
    #[error("failed to read backlog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid backlog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate ticket id in backlog: {0}")]
    DuplicateId(String),
}

/// A named, ready-made strategy text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoStrategy {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Tickets in input order plus demo strategies.
///
/// Input order matters: planning draws its tie-break jitter in this order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backlog {
    pub tickets: Vec<Ticket>,
    #[serde(default)]
    pub demo_strategies: Vec<DemoStrategy>,
}

impl Backlog {
    /// Parse backlog JSON and reject duplicate ticket ids.
    pub fn parse(content: &str) -> Result<Self, BacklogError> {
        let backlog: Self = serde_json::from_str(content)?;
        let mut seen = std::collections::HashSet::new();
        for ticket in &backlog.tickets {
            if !seen.insert(ticket.id.as_str()) {
                return Err(BacklogError::DuplicateId(ticket.id.clone()));
            }
        }
        Ok(backlog)
    }

    /// Load a backlog file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, BacklogError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| BacklogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    /// The demo backlog compiled into the crate.
    pub fn embedded() -> Result<Self, BacklogError> {
        Self::parse(EMBEDDED_BACKLOG)
    }

    /// Load from `path` when given, otherwise the embedded demo backlog.
    pub fn load_or_embedded(path: Option<&str>) -> Result<Self, BacklogError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::embedded(),
        }
    }

    /// Find a ticket by id.
    pub fn ticket(&self, id: &str) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    /// Find a demo strategy by id.
    pub fn demo(&self, id: &str) -> Option<&DemoStrategy> {
        self.demo_strategies.iter().find(|d| d.id == id)
    }
}
