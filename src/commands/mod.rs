mod export;
mod init;
mod refine;
mod select;
mod sprint;
mod status;
mod team;

pub use export::cmd_export;
pub use init::cmd_init;
pub use refine::cmd_refine;
pub use select::{cmd_demos, cmd_reject, cmd_select};
pub use sprint::{cmd_history, cmd_launch, cmd_reset};
pub use status::cmd_status;
pub use team::cmd_team;

use anyhow::{Context, Result};

use align::config::Config;
use align::log::ActivityLog;
use align::store::{FileStore, SprintStore};
use align::team::Roster;
use align::ticket::Backlog;

/// Sprint state under the configured state directory.
fn open_store(config: &Config) -> SprintStore<FileStore> {
    SprintStore::new(FileStore::new(config.state_dir()))
}

fn load_backlog(config: &Config) -> Result<Backlog> {
    Backlog::load_or_embedded(config.files_backlog.as_deref()).context("failed to load backlog")
}

fn load_roster(config: &Config) -> Result<Roster> {
    Roster::load_or_embedded(config.files_roster.as_deref()).context("failed to load roster")
}

/// Record an activity line. Failures are reported but never abort a command.
fn record_activity(config: &Config, actor: &str, message: &str) {
    if let Err(e) = ActivityLog::new(&config.state_dir(), actor).record(message) {
        tracing::warn!(error = %e, "failed to write activity log");
    }
}
