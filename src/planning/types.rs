use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ticket::Ticket;

use super::Summary;

/// How much of the nominal capacity to plan against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapacityMode {
    /// 90% of nominal capacity, leaving a buffer.
    #[default]
    Conservative,
    /// 110% of nominal capacity, for stretch goals.
    Aggressive,
}

impl CapacityMode {
    /// Parse capacity mode from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "conservative" => Some(Self::Conservative),
            "aggressive" => Some(Self::Aggressive),
            _ => None,
        }
    }

    /// Convert to string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Aggressive => "aggressive",
        }
    }

    /// Multiplier applied to nominal capacity.
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Conservative => 0.9,
            Self::Aggressive => 1.1,
        }
    }
}

impl fmt::Display for CapacityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric planning parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionParams {
    /// Nominal story point capacity.
    pub capacity_points: u32,
    pub capacity_mode: CapacityMode,
    /// Share of effective capacity reserved for tech debt, in percent.
    /// Not clamped; the CLI restricts it to 0..=100.
    pub debt_percent: u32,
}

impl Default for SelectionParams {
    fn default() -> Self {
        Self {
            capacity_points: 20,
            capacity_mode: CapacityMode::Conservative,
            debt_percent: 10,
        }
    }
}

/// Point budget derived from [`SelectionParams`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    pub effective: u32,
    pub tech_debt: u32,
    pub feature: u32,
}

impl Budget {
    /// `effective = floor(capacity * multiplier)`, debt is a floored share of it.
    pub fn new(params: &SelectionParams) -> Self {
        let effective =
            (f64::from(params.capacity_points) * params.capacity_mode.multiplier()).floor() as u32;
        let tech_debt =
            (f64::from(effective) * (f64::from(params.debt_percent) / 100.0)).floor() as u32;
        Self {
            effective,
            tech_debt,
            feature: effective.saturating_sub(tech_debt),
        }
    }
}

/// A ticket with its computed score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredTicket {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub score: f64,
    /// Display confidence in `[0.6, 0.95)`.
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_reason: Option<String>,
    /// Set once an accepted refinement has been merged into `ticket`.
    #[serde(default)]
    pub is_refined: bool,
}

impl ScoredTicket {
    pub(super) fn with_reason(&self, reason: impl Into<String>) -> Self {
        Self {
            selection_reason: Some(reason.into()),
            ..self.clone()
        }
    }

    /// The ticket id.
    pub fn id(&self) -> &str {
        &self.ticket.id
    }
}

/// Error returned when rejecting a ticket that is not in the selection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RejectError {
    #[error("ticket {0} is not part of the selected candidates")]
    NotSelected(String),
}

/// Output of [`select_candidates`](super::select_candidates).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionResult {
    /// Chosen tickets in selection order.
    pub selected: Vec<ScoredTicket>,
    /// Replacement candidates, at most five.
    pub backups: Vec<ScoredTicket>,
    pub summary: Summary,
}

impl SelectionResult {
    /// Ids of the selected tickets in selection order.
    pub fn selected_ids(&self) -> Vec<&str> {
        self.selected.iter().map(ScoredTicket::id).collect()
    }

    /// Ids of the backup tickets in order.
    pub fn backup_ids(&self) -> Vec<&str> {
        self.backups.iter().map(ScoredTicket::id).collect()
    }

    /// Drop a selected ticket and promote the first backup, if any.
    ///
    /// The promoted backup is appended to the end of `selected` and returned.
    /// The summary is left as computed at selection time.
    pub fn reject(&mut self, ticket_id: &str) -> Result<Option<ScoredTicket>, RejectError> {
        let position = self
            .selected
            .iter()
            .position(|t| t.id() == ticket_id)
            .ok_or_else(|| RejectError::NotSelected(ticket_id.to_string()))?;
        self.selected.remove(position);

        if self.backups.is_empty() {
            return Ok(None);
        }
        let replacement = self.backups.remove(0);
        self.selected.push(replacement.clone());
        Ok(Some(replacement))
    }
}
