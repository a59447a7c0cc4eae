use std::path::{Path, PathBuf};

use thiserror::Error;

use super::cli::{CliArgs, Command};
use super::{env, toml};
use crate::planning::{CapacityMode, SelectionParams};
use crate::store::DEFAULT_STATE_DIR;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "align.toml";

/// Align configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Nominal sprint capacity in story points.
    pub planning_capacity_points: u32,
    pub planning_capacity_mode: CapacityMode,
    /// Percent of effective capacity reserved for tech debt (0..=100).
    pub planning_debt_percent: u32,
    /// Directory for sprint state and the activity log.
    pub files_state_dir: String,
    /// Backlog JSON file; the embedded demo backlog when unset.
    pub files_backlog: Option<String>,
    /// Roster TOML file; the embedded roster when unset.
    pub files_roster: Option<String>,
    /// Whether refinement contexts are flagged as mock output.
    pub refine_mock_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        let params = SelectionParams::default();
        Self {
            planning_capacity_points: params.capacity_points,
            planning_capacity_mode: params.capacity_mode,
            planning_debt_percent: params.debt_percent,
            files_state_dir: DEFAULT_STATE_DIR.to_string(),
            files_backlog: None,
            files_roster: None,
            refine_mock_mode: true,
        }
    }
}

impl Config {
    /// Load configuration from all sources with proper precedence.
    ///
    /// Precedence: CLI args > env vars > config file > defaults. An explicit
    /// `--config` path must exist; `align.toml` is only read when present.
    pub fn load(cli_args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(ref path) = cli_args.config {
            config.merge_from(&Self::load_from_file(path)?);
        } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
            config.merge_from(&Self::load_from_file(DEFAULT_CONFIG_FILE)?);
        }

        config.apply_env();
        config.apply_cli(cli_args);

        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        toml::load_from_file(path)
    }

    /// Parse TOML content into configuration.
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        toml::parse_toml(content)
    }

    fn apply_env(&mut self) {
        env::apply_env(self);
    }

    /// Apply CLI arguments.
    pub(super) fn apply_cli(&mut self, args: &CliArgs) {
        if let Some(ref dir) = args.state_dir {
            self.files_state_dir = dir.display().to_string();
        }
        if let Some(ref path) = args.backlog {
            self.files_backlog = Some(path.display().to_string());
        }
        if let Some(ref path) = args.roster {
            self.files_roster = Some(path.display().to_string());
        }
        if let Some(Command::Select { ref planning, .. }) = args.command {
            if let Some(n) = planning.capacity {
                self.planning_capacity_points = n;
            }
            if let Some(mode) = planning.mode {
                self.planning_capacity_mode = mode;
            }
            if let Some(n) = planning.debt {
                self.planning_debt_percent = n;
            }
        }
    }

    /// Merge values from another config (for file-based config).
    fn merge_from(&mut self, other: &Self) {
        self.planning_capacity_points = other.planning_capacity_points;
        self.planning_capacity_mode = other.planning_capacity_mode;
        self.planning_debt_percent = other.planning_debt_percent;
        self.files_state_dir = other.files_state_dir.clone();
        self.files_backlog = other.files_backlog.clone();
        self.files_roster = other.files_roster.clone();
        self.refine_mock_mode = other.refine_mock_mode;
    }

    /// Planning parameters for [`crate::planning::select_candidates`].
    pub fn selection_params(&self) -> SelectionParams {
        SelectionParams {
            capacity_points: self.planning_capacity_points,
            capacity_mode: self.planning_capacity_mode,
            debt_percent: self.planning_debt_percent,
        }
    }

    pub fn state_dir(&self) -> PathBuf {
        PathBuf::from(&self.files_state_dir)
    }

    /// Generate default align.toml content.
    pub fn default_toml() -> String {
        let defaults = Self::default();
        format!(
            r#"# Align configuration

[planning]
capacity_points = {}
capacity_mode = "{}"  # conservative (90%) or aggressive (110%)
debt_percent = {}

[files]
state_dir = "{}"
# backlog = "backlog.json"
# roster = "roster.toml"

[refine]
mock_mode = {}
"#,
            defaults.planning_capacity_points,
            defaults.planning_capacity_mode,
            defaults.planning_debt_percent,
            defaults.files_state_dir,
            defaults.refine_mock_mode,
        )
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse error: {0}")]
    Parse(#[from] ::toml::de::Error),

    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}
