use anyhow::{anyhow, Context, Result};

use align::color::{self, emoji};
use align::config::Config;
use align::random::Seed;
use align::refine::{generate_context, refine_ticket, FieldValue, Improvement, RefinementResult};

/// Refine one backlog ticket and store the result.
pub fn cmd_refine(config: &Config, id: &str, seed: Option<&str>, json: bool) -> Result<()> {
    let backlog = super::load_backlog(config)?;
    let ticket = backlog
        .ticket(id)
        .ok_or_else(|| anyhow!("ticket not found in backlog: {}", id))?;

    let seed = seed.map_or_else(|| Seed::Text(ticket.id.clone()), Seed::parse);
    let context = generate_context(&seed, config.refine_mock_mode);
    let result = refine_ticket(ticket, Some(&context));

    if json {
        let output = serde_json::json!({ "context": context, "result": result });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "{} {} ({}, {}% context confidence{})",
            emoji::BRAIN,
            color::label(&context.reasoning),
            seed,
            (context.confidence * 100.0).round(),
            if context.mock_mode { ", mock" } else { "" }
        );
        print_refinement(&result);
    }

    let merged = super::open_store(config)
        .save_refined_ticket(&result)
        .context("failed to save refinement")?;
    if merged && !json {
        println!("{} Applied to {} in the current sprint", emoji::CHECK, color::ticket_id(id));
    }
    super::record_activity(
        config,
        "refine",
        &format!(
            "Refined {} ({} suggestions, {}% confidence)",
            id,
            result.improvements.len(),
            (result.overall_confidence * 100.0).round()
        ),
    );
    Ok(())
}

fn print_refinement(result: &RefinementResult) {
    println!(
        "{} {}  {}",
        emoji::SPARKLES,
        color::ticket_id(&result.original.id),
        result.original.title
    );
    println!();
    for improvement in &result.improvements {
        print_improvement(improvement);
    }
    println!(
        "{} {}",
        color::label("Overall confidence:"),
        color::confidence(result.overall_confidence)
    );
    for warning in &result.ai_warnings {
        println!(
            "  {} {}: {}",
            emoji::WARNING,
            warning.field.as_str(),
            color::warning(&warning.message)
        );
    }
}

fn print_improvement(improvement: &Improvement) {
    println!(
        "{} ({})  {}",
        color::label(improvement.field.as_str()),
        color::confidence(improvement.confidence),
        color::timestamp(&improvement.reason)
    );
    if let Some(ref before) = improvement.before {
        println!("  - {}", render_value(before).replace('\n', "\n    "));
    }
    if let Some(ref after) = improvement.after {
        println!("  + {}", render_value(after).replace('\n', "\n    "));
    }
    println!();
}

fn render_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Points(points) => format!("{} pts", points),
        FieldValue::Text(text) => text.clone(),
        FieldValue::Risks(risks) => risks
            .iter()
            .map(|r| format!("[{}] {}", r.severity.as_str(), r.message))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
