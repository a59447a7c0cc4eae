use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::types::{Config, ConfigError};
use crate::planning::CapacityMode;

/// On-disk layout of `align.toml`. Every key is optional; unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    planning: PlanningSection,
    files: FilesSection,
    refine: RefineSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PlanningSection {
    capacity_points: Option<u32>,
    capacity_mode: Option<String>,
    debt_percent: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FilesSection {
    state_dir: Option<String>,
    backlog: Option<String>,
    roster: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RefineSection {
    mock_mode: Option<bool>,
}

pub(super) fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_toml(&content)
}

pub(super) fn parse_toml(content: &str) -> Result<Config, ConfigError> {
    let file: FileConfig = toml::from_str(content)?;
    let mut config = Config::default();

    if let Some(n) = file.planning.capacity_points {
        config.planning_capacity_points = n;
    }
    if let Some(ref mode) = file.planning.capacity_mode {
        config.planning_capacity_mode = CapacityMode::parse(mode).ok_or_else(|| ConfigError::Invalid {
            key: "planning.capacity_mode",
            value: mode.clone(),
        })?;
    }
    if let Some(n) = file.planning.debt_percent {
        if n > 100 {
            return Err(ConfigError::Invalid {
                key: "planning.debt_percent",
                value: n.to_string(),
            });
        }
        config.planning_debt_percent = n;
    }
    if let Some(dir) = file.files.state_dir {
        config.files_state_dir = dir;
    }
    if file.files.backlog.is_some() {
        config.files_backlog = file.files.backlog;
    }
    if file.files.roster.is_some() {
        config.files_roster = file.files.roster;
    }
    if let Some(mock) = file.refine.mock_mode {
        config.refine_mock_mode = mock;
    }

    Ok(config)
}
