use anyhow::{anyhow, bail, Context, Result};

use align::color::{self, emoji};
use align::config::Config;
use align::planning::{select_candidates, ScoredTicket, SelectionResult};
use align::random::Seed;
use align::store::CurrentSprint;

/// List demo strategies from the backlog.
pub fn cmd_demos(config: &Config) -> Result<()> {
    let backlog = super::load_backlog(config)?;

    println!("{} {}:", emoji::TASK, color::label("Demo Strategies"));
    if backlog.demo_strategies.is_empty() {
        println!("  (none)");
    }
    for demo in &backlog.demo_strategies {
        println!("  {}  {}", color::info(&demo.id), color::label(&demo.name));
        println!("      {}", demo.description);
    }
    Ok(())
}

/// Select candidates for a strategy and save them as the current sprint.
pub fn cmd_select(
    config: &Config,
    strategy: Option<&str>,
    demo: Option<&str>,
    seed: Option<&str>,
    json: bool,
) -> Result<()> {
    let backlog = super::load_backlog(config)?;

    let strategy = match (strategy, demo) {
        (_, Some(id)) => backlog
            .demo(id)
            .map(|d| d.description.clone())
            .ok_or_else(|| anyhow!("unknown demo strategy: {}", id))?,
        (Some(text), None) => text.trim().to_string(),
        (None, None) => bail!("a strategy or --demo is required"),
    };
    if strategy.is_empty() {
        bail!("strategy must not be empty");
    }

    let seed = seed.map_or_else(|| Seed::Text(strategy.clone()), Seed::parse);
    let params = config.selection_params();
    tracing::debug!(%seed, ?params, "selecting candidates");

    let store = super::open_store(config);
    store
        .save_draft_strategy(&strategy)
        .context("failed to save strategy draft")?;

    let result = select_candidates(&strategy, &backlog.tickets, &seed, &params);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_selection(&strategy, &result);
    }

    let message = format!(
        "Selected {} tickets ({} pts) for: {}",
        result.summary.ticket_count, result.summary.total_points, strategy
    );
    store
        .save_current_sprint(&CurrentSprint::new(&strategy, &params, result))
        .context("failed to save current sprint")?;
    super::record_activity(config, "select", &message);
    Ok(())
}

/// Remove a ticket from the current sprint, promoting the first backup.
pub fn cmd_reject(config: &Config, id: &str) -> Result<()> {
    let store = super::open_store(config);
    let mut sprint = store
        .current_sprint()
        .ok_or_else(|| anyhow!("no current sprint; run 'align select' first"))?;

    let mut selection = sprint.selection();
    let promoted = selection.reject(id)?;
    sprint.apply(selection);
    store
        .save_current_sprint(&sprint)
        .context("failed to save current sprint")?;

    println!("{} Rejected {}", emoji::CROSS, color::ticket_id(id));
    let message = match promoted {
        Some(backup) => {
            println!(
                "{} Promoted backup {} ({} pts)",
                emoji::SPARKLES,
                color::ticket_id(backup.id()),
                backup.ticket.story_points
            );
            format!("Rejected {}, promoted {}", id, backup.id())
        }
        None => {
            println!("  {}", color::warning("No backups left to promote"));
            format!("Rejected {}", id)
        }
    };
    super::record_activity(config, "reject", &message);
    Ok(())
}

pub(super) fn print_ticket_line(ticket: &ScoredTicket) {
    let t = &ticket.ticket;
    let debt = if t.tech_debt { " [debt]" } else { "" };
    let refined = if ticket.is_refined { " [refined]" } else { "" };
    println!(
        "  {}  {:>2} pts  {:<6}  {}{}{}  {}",
        color::ticket_id(&t.id),
        t.story_points,
        color::priority(t.priority),
        t.title,
        debt,
        refined,
        color::confidence(ticket.confidence),
    );
    if let Some(ref reason) = ticket.selection_reason {
        println!("          {}", color::timestamp(reason));
    }
}

fn print_selection(strategy: &str, result: &SelectionResult) {
    let summary = &result.summary;

    println!("{} {} {}", emoji::SPRINT, color::label("Strategy:"), strategy);
    println!();
    println!("{} ({}):", color::label("Selected"), color::number(result.selected.len()));
    if result.selected.is_empty() {
        println!("  (nothing fits)");
    }
    for ticket in &result.selected {
        print_ticket_line(ticket);
    }

    if !result.backups.is_empty() {
        println!();
        println!("{} ({}):", color::label("Backups"), color::number(result.backups.len()));
        for ticket in &result.backups {
            print_ticket_line(ticket);
        }
    }

    println!();
    println!("{}", color::label("Summary"));
    println!(
        "  Points:       {} ({} feature, {} tech debt)",
        color::number(summary.total_points),
        summary.feature_points,
        summary.tech_debt_points
    );
    println!("  Strategic fit: {}%", color::number(summary.strategic_fit));
    println!("  Utilization:   {}%", color::number(summary.capacity_utilization));
    for warning in &summary.warnings {
        println!(
            "  {} [{}] {}",
            emoji::WARNING,
            color::warning_kind(warning.kind),
            warning.message
        );
    }
}
