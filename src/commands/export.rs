use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::Utc;

use align::config::{Config, Report};
use align::export::{sprint_candidates_csv, sprint_history_csv, team_capacity_csv};

/// Render a CSV report to `output` or stdout.
pub fn cmd_export(config: &Config, report: Report, output: Option<&Path>) -> Result<()> {
    let csv = match report {
        Report::Candidates => {
            let sprint = super::open_store(config)
                .current_sprint()
                .ok_or_else(|| anyhow!("no current sprint to export; run 'align select' first"))?;
            sprint_candidates_csv(&sprint.selected, &sprint.summary)?
        }
        Report::History => sprint_history_csv(&super::open_store(config).sprint_history(), Utc::now())?,
        Report::Team => team_capacity_csv(&super::load_roster(config)?, Utc::now())?,
    };

    match output {
        Some(path) => {
            fs::write(path, &csv).with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
            super::record_activity(config, "export", &format!("Exported {} report to {}", report.as_str(), path.display()));
        }
        None => print!("{}", csv),
    }
    Ok(())
}
