use anyhow::{anyhow, bail, Context, Result};

use align::color::{self, emoji};
use align::config::Config;
use align::store::history_averages;

/// Move the current sprint into history.
///
/// A plan with warnings only launches with `confirm`. Refinements of selected
/// tickets are counted on the history entry, then the current sprint and all
/// stored refinements are cleared.
pub fn cmd_launch(config: &Config, confirm: bool) -> Result<()> {
    let store = super::open_store(config);
    let sprint = store
        .current_sprint()
        .ok_or_else(|| anyhow!("no current sprint; run 'align select' first"))?;

    let warnings = &sprint.summary.warnings;
    if !warnings.is_empty() && !confirm {
        let listed: Vec<String> = warnings
            .iter()
            .map(|w| format!("  - [{}] {}", w.kind.as_str(), w.message))
            .collect();
        bail!(
            "sprint has {} unacknowledged warning(s):\n{}\nre-run with --confirm to launch anyway",
            warnings.len(),
            listed.join("\n")
        );
    }

    let refined = store.refined_tickets();
    let refined_count = sprint
        .selected
        .iter()
        .filter(|t| refined.contains_key(t.id()))
        .count();

    let entry = store
        .add_to_history(&sprint, refined_count)
        .context("failed to record sprint history")?;
    store
        .clear_current_sprint()
        .context("failed to clear current sprint")?;
    store
        .clear_refined_tickets()
        .context("failed to clear refinements")?;

    println!(
        "{} Launched {} with {} tickets ({} pts, {} refined)",
        emoji::ROCKET,
        color::info(&entry.id),
        color::number(entry.selected.len()),
        entry.summary.total_points,
        refined_count
    );
    super::record_activity(
        config,
        "launch",
        &format!("Launched {} ({} pts)", entry.id, entry.summary.total_points),
    );
    Ok(())
}

/// Print launched sprints, or clear them.
pub fn cmd_history(config: &Config, clear: bool) -> Result<()> {
    let store = super::open_store(config);

    if clear {
        store
            .clear_sprint_history()
            .context("failed to clear sprint history")?;
        println!("{} Sprint history cleared", emoji::CHECK);
        super::record_activity(config, "history", "Cleared sprint history");
        return Ok(());
    }

    let history = store.sprint_history();
    println!("{} {} ({}):", emoji::CLOCK, color::label("Sprint History"), color::number(history.len()));
    if history.is_empty() {
        println!("  (no launched sprints)");
        return Ok(());
    }

    for entry in &history {
        println!(
            "  {}  {}  {} tickets, {} pts, fit {}%, util {}%",
            color::info(&entry.id),
            color::timestamp(&entry.launched_at.format("%Y-%m-%d %H:%M").to_string()),
            entry.selected.len(),
            entry.summary.total_points,
            entry.summary.strategic_fit,
            entry.summary.capacity_utilization
        );
        println!("      {}", entry.strategy);
    }

    if let Some(avg) = history_averages(&history) {
        println!();
        println!(
            "  {} {} pts, fit {}%, util {}%",
            color::label("Averages:"),
            color::number(avg.points),
            avg.strategic_fit,
            avg.capacity_utilization
        );
    }
    Ok(())
}

/// Clear every stored key.
pub fn cmd_reset(config: &Config) -> Result<()> {
    super::open_store(config)
        .clear_all()
        .context("failed to clear sprint state")?;
    println!("{} Cleared all sprint state in {}", emoji::CHECK, config.files_state_dir);
    super::record_activity(config, "reset", "Cleared all sprint state");
    Ok(())
}
