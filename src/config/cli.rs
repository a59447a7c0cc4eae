use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::planning::CapacityMode;

/// Command-line arguments.
#[derive(Debug, Default, Parser)]
#[command(
    name = "align",
    version = env!("CARGO_PKG_VERSION"),
    about = "Deterministic sprint planning from a strategy statement"
)]
pub struct CliArgs {
    /// Path to config file (defaults to ./align.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding sprint state and the activity log
    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,

    /// Backlog JSON file (defaults to the built-in demo backlog)
    #[arg(long, global = true)]
    pub backlog: Option<PathBuf>,

    /// Team roster TOML file (defaults to the built-in roster)
    #[arg(long, global = true)]
    pub roster: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Capacity flags shared by `select`.
#[derive(Debug, Clone, Default, Args)]
pub struct PlanningArgs {
    /// Sprint capacity in story points
    #[arg(long)]
    pub capacity: Option<u32>,

    /// Capacity mode: conservative (90%) or aggressive (110%)
    #[arg(long, value_parser = parse_mode)]
    pub mode: Option<CapacityMode>,

    /// Percent of capacity reserved for tech debt
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub debt: Option<u32>,
}

/// Which report `export` writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Report {
    /// The current sprint's selected tickets and summary
    Candidates,
    /// Launched sprints
    History,
    /// Team capacity breakdown
    Team,
}

impl Report {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Candidates => "candidates",
            Self::History => "history",
            Self::Team => "team",
        }
    }
}

/// Align subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Write a default align.toml and create the state directory
    Init {
        /// Overwrite an existing align.toml
        #[arg(long)]
        force: bool,
    },

    /// List the demo strategies shipped with the backlog
    Demos,

    /// Select sprint candidates for a strategy
    Select {
        /// Strategy text (or use --demo)
        #[arg(required_unless_present = "demo", conflicts_with = "demo")]
        strategy: Option<String>,

        /// Use a demo strategy by id
        #[arg(long)]
        demo: Option<String>,

        /// Seed for the planner (number or text; defaults to the strategy text)
        #[arg(long)]
        seed: Option<String>,

        #[command(flatten)]
        planning: PlanningArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Suggest refinements for a ticket
    Refine {
        /// Ticket id
        id: String,

        /// Seed for the refinement context (defaults to the ticket id)
        #[arg(long)]
        seed: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Drop a ticket from the current sprint and promote the next backup
    Reject {
        /// Ticket id
        id: String,
    },

    /// Record the current sprint in history and clear working state
    Launch {
        /// Acknowledge capacity and risk warnings on the plan
        #[arg(long)]
        confirm: bool,
    },

    /// Show the current sprint, refinements and recent activity
    Status,

    /// Show launched sprints
    History {
        /// Delete all history entries
        #[arg(long)]
        clear: bool,
    },

    /// Show team capacity and bottlenecks
    Team {
        /// Required points for a role, e.g. Backend=16 (repeatable)
        #[arg(long = "need", value_name = "ROLE=POINTS", value_parser = parse_need)]
        needs: Vec<(String, u32)>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a CSV report
    Export {
        #[arg(value_enum)]
        report: Report,

        /// Output path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Clear all stored sprint state
    Reset,
}

pub(super) fn parse_mode(raw: &str) -> Result<CapacityMode, String> {
    CapacityMode::parse(raw)
        .ok_or_else(|| format!("unknown capacity mode '{}' (conservative|aggressive)", raw))
}

/// Parse `ROLE=POINTS`.
pub(super) fn parse_need(raw: &str) -> Result<(String, u32), String> {
    let (role, points) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ROLE=POINTS, got '{}'", raw))?;
    let role = role.trim();
    if role.is_empty() {
        return Err(format!("missing role in '{}'", raw));
    }
    let points = points
        .trim()
        .parse()
        .map_err(|_| format!("invalid points in '{}'", raw))?;
    Ok((role.to_string(), points))
}
