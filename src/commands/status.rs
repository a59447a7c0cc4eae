use anyhow::Result;

use align::color::{self, emoji};
use align::config::Config;
use align::log::ActivityLog;

/// Show the current sprint, stored refinements and recent activity.
pub fn cmd_status(config: &Config) -> Result<()> {
    let store = super::open_store(config);

    if let Some(draft) = store.draft_strategy() {
        println!("{} {} {}", emoji::TASK, color::label("Draft strategy:"), draft.strategy);
    }

    println!("\n{} {}:", emoji::SPRINT, color::label("Current Sprint"));
    match store.current_sprint() {
        Some(sprint) => {
            println!("  Strategy: {}", sprint.strategy);
            println!(
                "  Capacity: {} pts ({}, {}% tech debt)",
                sprint.capacity_points, sprint.capacity_mode, sprint.debt_percent
            );
            for ticket in &sprint.selected {
                super::select::print_ticket_line(ticket);
            }
            println!(
                "  Backups:  {}",
                if sprint.backups.is_empty() {
                    "(none)".to_string()
                } else {
                    sprint.backups.iter().map(|t| t.id()).collect::<Vec<_>>().join(", ")
                }
            );
        }
        None => println!("  (none; run 'align select')"),
    }

    let refined = store.refined_tickets();
    println!(
        "\n{} {} ({}):",
        emoji::SPARKLES,
        color::label("Refined Tickets"),
        color::number(refined.len())
    );
    for (id, record) in &refined {
        println!(
            "  {}  {} suggestions, {}",
            color::ticket_id(id),
            record.result.improvements.len(),
            color::confidence(record.result.overall_confidence)
        );
    }

    println!("\n{} {}:", emoji::CLOCK, color::label("Recent Activity"));
    match ActivityLog::new(&config.state_dir(), "status").read_recent(5) {
        Ok(lines) if lines.is_empty() => println!("  (no activity)"),
        Ok(lines) => {
            for line in lines {
                println!("  {}", color::activity_line(&line));
            }
        }
        Err(e) => println!("  (error reading activity log: {})", e),
    }

    Ok(())
}
