use serde::{Deserialize, Serialize};

use super::ScoredTicket;
use crate::ticket::Priority;

/// Scores are normalised against this per-ticket maximum for strategic fit.
const MAX_TICKET_SCORE: f64 = 15.0;

/// Strategic fit never reports more than this.
const STRATEGIC_FIT_CAP: u32 = 95;

/// Used/effective ratio above which a capacity warning is raised.
const NEAR_FULL_RATIO: f64 = 0.95;

/// Share of high-priority tickets above which a risk warning is raised.
const HIGH_PRIORITY_RATIO: f64 = 0.7;

/// Warning category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningKind {
    Capacity,
    Risk,
}

impl WarningKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Capacity => "capacity",
            Self::Risk => "risk",
        }
    }
}

/// A plan-level warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    #[serde(rename = "type")]
    pub kind: WarningKind,
    pub message: String,
}

/// Aggregate numbers for a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_points: u32,
    pub feature_points: u32,
    pub tech_debt_points: u32,
    pub ticket_count: usize,
    pub backup_count: usize,
    /// Percent, capped at 95. Zero when nothing was selected.
    pub strategic_fit: u32,
    /// Percent of effective capacity used. Zero when effective capacity is zero.
    pub capacity_utilization: u32,
    pub warnings: Vec<Warning>,
}

impl Summary {
    pub(super) fn build(
        selected: &[ScoredTicket],
        backup_count: usize,
        feature_points: u32,
        tech_debt_points: u32,
        effective_capacity: u32,
    ) -> Self {
        let total_points = feature_points.saturating_add(tech_debt_points);
        Self {
            total_points,
            feature_points,
            tech_debt_points,
            ticket_count: selected.len(),
            backup_count,
            strategic_fit: strategic_fit(selected),
            capacity_utilization: percent(total_points, effective_capacity),
            warnings: warnings(selected, effective_capacity, total_points),
        }
    }
}

fn strategic_fit(selected: &[ScoredTicket]) -> u32 {
    if selected.is_empty() {
        return 0;
    }
    let total: f64 = selected.iter().map(|t| t.score).sum();
    let max_possible = selected.len() as f64 * MAX_TICKET_SCORE;
    let fit = ((total / max_possible) * 100.0).round() as u32;
    fit.min(STRATEGIC_FIT_CAP)
}

fn percent(used: u32, capacity: u32) -> u32 {
    if capacity == 0 {
        return 0;
    }
    ((f64::from(used) / f64::from(capacity)) * 100.0).round() as u32
}

fn warnings(selected: &[ScoredTicket], capacity: u32, used: u32) -> Vec<Warning> {
    let mut warnings = Vec::new();

    if capacity > 0 && f64::from(used) / f64::from(capacity) > NEAR_FULL_RATIO {
        warnings.push(Warning {
            kind: WarningKind::Capacity,
            message: "Sprint is at near-full capacity. Consider buffer for unexpected work."
                .to_string(),
        });
    }

    let high_priority = selected
        .iter()
        .filter(|t| t.ticket.priority == Priority::High)
        .count();
    if high_priority as f64 > selected.len() as f64 * HIGH_PRIORITY_RATIO {
        warnings.push(Warning {
            kind: WarningKind::Risk,
            message: "Many high-priority items. Execution risk if blockers arise.".to_string(),
        });
    }

    warnings
}
