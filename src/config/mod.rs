//! Configuration loading for align.
//!
//! Supports align.toml, CLI flags, and environment variables.
//! Precedence (highest to lowest): CLI flags > env vars > config file > defaults.

mod cli;
mod env;
mod toml;
mod types;

pub use cli::{CliArgs, Command, PlanningArgs, Report};
pub use types::{Config, ConfigError, DEFAULT_CONFIG_FILE};
