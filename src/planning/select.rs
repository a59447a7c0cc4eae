use std::cmp::Ordering;

use tracing::debug;

use crate::random::{Seed, SeededRandom};
use crate::ticket::{Priority, Ticket};

use super::keywords::{extract_keywords, matched_keywords};
use super::{Budget, ScoredTicket, SelectionParams, SelectionResult, Summary};

/// Maximum number of backup tickets kept for rejection handling.
pub const MAX_BACKUPS: usize = 5;

/// Score added for each strategy keyword found in a ticket.
const KEYWORD_BONUS: f64 = 2.0;

/// Score weight of business impact.
const IMPACT_WEIGHT: f64 = 0.5;

/// Upper bound of the deterministic tie-breaking jitter.
const SCORE_JITTER: f64 = 0.5;

/// Pick sprint candidates for `strategy` from `backlog`.
///
/// Tickets are scored and stable-sorted by score, highest first. Tech debt
/// tickets fill their share of the budget first, then feature tickets fill the
/// rest provided every dependency is already in the selection. Anything that
/// does not fit becomes a backup while fewer than [`MAX_BACKUPS`] are held.
///
/// Identical inputs always produce identical output.
pub fn select_candidates(
    strategy: &str,
    backlog: &[Ticket],
    seed: &Seed,
    params: &SelectionParams,
) -> SelectionResult {
    let mut rng = SeededRandom::from_seed(seed);
    let keywords = extract_keywords(strategy);
    let budget = Budget::new(params);

    debug!(
        seed = %seed,
        keywords = ?keywords,
        effective = budget.effective,
        tech_debt = budget.tech_debt,
        feature = budget.feature,
        "Selecting sprint candidates"
    );

    let mut scored: Vec<ScoredTicket> = backlog
        .iter()
        .map(|ticket| {
            // Score draw precedes confidence draw for each ticket.
            let score = score_ticket(ticket, &keywords, &mut rng);
            let confidence = rng.next_in(0.6, 0.35);
            ScoredTicket {
                ticket: ticket.clone(),
                score,
                confidence,
                selection_reason: None,
                is_refined: false,
            }
        })
        .collect();

    // Vec::sort_by is stable, so equal scores keep backlog order.
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let (tech_debt, features): (Vec<ScoredTicket>, Vec<ScoredTicket>) =
        scored.into_iter().partition(|t| t.ticket.tech_debt);

    let mut selected: Vec<ScoredTicket> = Vec::new();
    let mut backups: Vec<ScoredTicket> = Vec::new();
    let mut used_debt = 0u32;
    let mut used_feature = 0u32;

    for ticket in &tech_debt {
        let points = ticket.ticket.story_points;
        if let Some(total) = fit_within(used_debt, points, budget.tech_debt) {
            selected.push(ticket.with_reason("Tech debt allocation"));
            used_debt = total;
        } else if backups.len() < MAX_BACKUPS {
            backups.push(ticket.with_reason("Backup - tech debt"));
        }
    }

    for ticket in &features {
        let unmet = ticket
            .ticket
            .dependencies
            .iter()
            .any(|dep| !selected.iter().any(|s| s.id() == dep));
        if unmet {
            debug!(ticket = %ticket.id(), "Unmet dependency, holding as backup");
            if backups.len() < MAX_BACKUPS {
                backups.push(ticket.with_reason("Backup - unmet dependencies"));
            }
            continue;
        }

        let points = ticket.ticket.story_points;
        if let Some(total) = fit_within(used_feature, points, budget.feature) {
            let reason = selection_reason(&ticket.ticket, &keywords);
            selected.push(ticket.with_reason(reason));
            used_feature = total;
        } else if backups.len() < MAX_BACKUPS {
            backups.push(ticket.with_reason("Backup - capacity overflow"));
        }
    }

    let summary = Summary::build(
        &selected,
        backups.len(),
        used_feature,
        used_debt,
        budget.effective,
    );

    debug!(
        selected = selected.len(),
        backups = backups.len(),
        points = summary.total_points,
        fit = summary.strategic_fit,
        "Selection complete"
    );

    SelectionResult {
        selected,
        backups,
        summary,
    }
}

fn score_ticket(ticket: &Ticket, keywords: &[&str], rng: &mut SeededRandom) -> f64 {
    let text = ticket.search_text();
    let matches = matched_keywords(keywords, &text).len() as f64;

    ticket.priority.weight()
        + matches * KEYWORD_BONUS
        + ticket.business_impact() * IMPACT_WEIGHT
        + rng.next_f64() * SCORE_JITTER
}

fn selection_reason(ticket: &Ticket, keywords: &[&str]) -> String {
    let matched = matched_keywords(keywords, &ticket.search_text());
    if !matched.is_empty() {
        return format!("Aligns with strategy: {}", matched.join(", "));
    }
    if ticket.priority == Priority::High {
        return "High priority item".to_string();
    }
    "Fits capacity and dependencies".to_string()
}

/// New running total if `points` still fits under `limit`. Overflow never fits.
fn fit_within(used: u32, points: u32, limit: u32) -> Option<u32> {
    used.checked_add(points).filter(|total| *total <= limit)
}
