use serde::{Deserialize, Serialize};

use crate::ticket::Ticket;

use super::Risk;

/// Ticket field an improvement targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Title,
    Description,
    AcceptanceCriteria,
    StoryPoints,
    Risks,
}

impl Field {
    /// Convert to the camelCase field name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::AcceptanceCriteria => "acceptanceCriteria",
            Self::StoryPoints => "storyPoints",
            Self::Risks => "risks",
        }
    }
}

/// Category of an improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImprovementKind {
    Clarity,
    Completeness,
    Addition,
    Adjustment,
    Warning,
}

/// Value on either side of an improvement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Points(u32),
    Text(String),
    Risks(Vec<Risk>),
}

impl FieldValue {
    /// Text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// One proposed change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Improvement {
    pub field: Field,
    #[serde(rename = "type")]
    pub kind: ImprovementKind,
    pub before: Option<FieldValue>,
    pub after: Option<FieldValue>,
    pub confidence: f64,
    pub reason: String,
}

/// Ticket with all proposals applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinedTicket {
    #[serde(flatten)]
    pub ticket: Ticket,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_points: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risks: Option<Vec<Risk>>,
}

impl From<Ticket> for RefinedTicket {
    fn from(ticket: Ticket) -> Self {
        Self {
            ticket,
            suggested_points: None,
            risks: None,
        }
    }
}

/// Low-confidence notice for a single improvement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiWarning {
    pub field: Field,
    pub message: String,
}

/// Output of [`refine_ticket`](super::refine_ticket).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinementResult {
    pub original: Ticket,
    pub refined: RefinedTicket,
    pub improvements: Vec<Improvement>,
    pub overall_confidence: f64,
    pub ai_warnings: Vec<AiWarning>,
}

impl RefinementResult {
    /// The improvement for `field`, if one was proposed.
    pub fn improvement(&self, field: Field) -> Option<&Improvement> {
        self.improvements.iter().find(|i| i.field == field)
    }
}
