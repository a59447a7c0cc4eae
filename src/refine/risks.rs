use serde::{Deserialize, Serialize};

use crate::random::SeededRandom;
use crate::ticket::Ticket;

/// Tickets at or above this size are flagged as a scope risk.
const LARGE_TICKET_POINTS: u32 = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskKind {
    Dependency,
    Scope,
    Technical,
    Estimate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// A flagged delivery risk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Risk {
    #[serde(rename = "type")]
    pub kind: RiskKind,
    pub severity: Severity,
    pub message: String,
}

pub(super) fn identify(ticket: &Ticket, rng: &mut SeededRandom) -> Vec<Risk> {
    let mut risks = Vec::new();

    if !ticket.dependencies.is_empty() {
        risks.push(Risk {
            kind: RiskKind::Dependency,
            severity: Severity::Medium,
            message: format!("Depends on {} other ticket(s)", ticket.dependencies.len()),
        });
    }

    if ticket.story_points >= LARGE_TICKET_POINTS {
        risks.push(Risk {
            kind: RiskKind::Scope,
            severity: Severity::High,
            message: "Large ticket - consider breaking into smaller deliverables".to_string(),
        });
    }

    if ticket.tech_debt {
        risks.push(Risk {
            kind: RiskKind::Technical,
            severity: Severity::Low,
            message: "Tech debt item may uncover additional cleanup needs".to_string(),
        });
    }

    // Always drawn, whether or not other risks were found.
    if rng.next_f64() > 0.7 {
        risks.push(Risk {
            kind: RiskKind::Estimate,
            severity: Severity::Low,
            message: "Story point estimate has moderate uncertainty".to_string(),
        });
    }

    risks
}
