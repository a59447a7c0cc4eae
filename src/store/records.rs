use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::planning::{CapacityMode, ScoredTicket, SelectionParams, SelectionResult, Summary};
use crate::refine::RefinementResult;

/// A strategy saved while it is being written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftStrategy {
    pub strategy: String,
    pub saved_at: DateTime<Utc>,
}

/// A stored refinement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinedRecord {
    #[serde(flatten)]
    pub result: RefinementResult,
    pub refined_at: DateTime<Utc>,
}

/// The sprint currently being planned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentSprint {
    pub strategy: String,
    pub capacity_points: u32,
    pub capacity_mode: CapacityMode,
    pub debt_percent: u32,
    pub selected: Vec<ScoredTicket>,
    pub backups: Vec<ScoredTicket>,
    pub summary: Summary,
    pub saved_at: DateTime<Utc>,
}

impl CurrentSprint {
    /// Snapshot a selection made with `params`.
    pub fn new(strategy: &str, params: &SelectionParams, result: SelectionResult) -> Self {
        Self {
            strategy: strategy.to_string(),
            capacity_points: params.capacity_points,
            capacity_mode: params.capacity_mode,
            debt_percent: params.debt_percent,
            selected: result.selected,
            backups: result.backups,
            summary: result.summary,
            saved_at: Utc::now(),
        }
    }

    /// Selection view of the snapshot, for rejection handling.
    pub fn selection(&self) -> SelectionResult {
        SelectionResult {
            selected: self.selected.clone(),
            backups: self.backups.clone(),
            summary: self.summary.clone(),
        }
    }

    /// Merge an accepted refinement into the matching selected ticket.
    ///
    /// Title, description and acceptance criteria are taken from the refined
    /// ticket; score, confidence and reason are kept. Returns `false` when the
    /// ticket is not selected.
    pub fn apply_refinement(&mut self, result: &RefinementResult) -> bool {
        let refined = &result.refined.ticket;
        match self.selected.iter_mut().find(|t| t.id() == refined.id) {
            Some(selected) => {
                selected.ticket = refined.clone();
                selected.is_refined = true;
                self.saved_at = Utc::now();
                true
            }
            None => false,
        }
    }

    /// Replace the tickets with an updated selection; the summary is kept.
    pub fn apply(&mut self, selection: SelectionResult) {
        self.selected = selection.selected;
        self.backups = selection.backups;
        self.saved_at = Utc::now();
    }
}

/// A launched sprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// `sprint-<unix millis>` of the launch time.
    pub id: String,
    pub launched_at: DateTime<Utc>,
    pub strategy: String,
    pub capacity_points: u32,
    pub capacity_mode: CapacityMode,
    pub debt_percent: u32,
    pub selected: Vec<ScoredTicket>,
    pub summary: Summary,
    #[serde(default)]
    pub refined_count: usize,
}

impl HistoryEntry {
    pub fn from_sprint(sprint: &CurrentSprint, refined_count: usize, launched_at: DateTime<Utc>) -> Self {
        Self {
            id: format!("sprint-{}", launched_at.timestamp_millis()),
            launched_at,
            strategy: sprint.strategy.clone(),
            capacity_points: sprint.capacity_points,
            capacity_mode: sprint.capacity_mode,
            debt_percent: sprint.debt_percent,
            selected: sprint.selected.clone(),
            summary: sprint.summary.clone(),
            refined_count,
        }
    }
}

/// Rounded means over a set of launched sprints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryAverages {
    pub points: u32,
    pub strategic_fit: u32,
    pub capacity_utilization: u32,
}

/// Averages across `entries`, or `None` when there are none.
pub fn history_averages(entries: &[HistoryEntry]) -> Option<HistoryAverages> {
    if entries.is_empty() {
        return None;
    }
    let n = entries.len() as f64;
    let mean = |f: fn(&Summary) -> u32| {
        (entries.iter().map(|e| f64::from(f(&e.summary))).sum::<f64>() / n).round() as u32
    };
    Some(HistoryAverages {
        points: mean(|s| s.total_points),
        strategic_fit: mean(|s| s.strategic_fit),
        capacity_utilization: mean(|s| s.capacity_utilization),
    })
}
