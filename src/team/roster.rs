use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Roster shipped with the binary.
const EMBEDDED_ROSTER: &str = include_str!("../../data/roster.toml");

/// Errors raised while loading a roster.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("failed to read roster {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid roster TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Points taken off a member's base capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deduction {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: u32,
    #[serde(default)]
    pub reason: String,
}

/// One engineer on the team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: u32,
    pub name: String,
    pub initials: String,
    pub role: String,
    pub base_points: u32,
    #[serde(default)]
    pub deductions: Vec<Deduction>,
    #[serde(default)]
    pub assigned_points: u32,
}

impl TeamMember {
    /// Sum of all deductions.
    pub fn total_deductions(&self) -> u32 {
        self.deductions.iter().map(|d| d.value).sum()
    }
}

/// The team, in roster file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub members: Vec<TeamMember>,
}

impl Roster {
    /// Parse a TOML roster.
    pub fn parse(content: &str) -> Result<Self, RosterError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a roster file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RosterError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| RosterError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    /// The default five-person team.
    pub fn embedded() -> Result<Self, RosterError> {
        Self::parse(EMBEDDED_ROSTER)
    }

    /// Load from `path` when given, otherwise the embedded roster.
    pub fn load_or_embedded(path: Option<&str>) -> Result<Self, RosterError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::embedded(),
        }
    }
}
