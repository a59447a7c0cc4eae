use std::fmt;

use serde::{Deserialize, Serialize};

/// Business impact assumed when a ticket does not carry one.
pub const DEFAULT_BUSINESS_IMPACT: f64 = 5.0;

/// Ticket priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Scoring weight: high=3, medium=2, low=1.
    pub fn weight(self) -> f64 {
        match self {
            Self::High => 3.0,
            Self::Medium => 2.0,
            Self::Low => 1.0,
        }
    }

    /// Convert to string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A backlog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Stable identity, e.g. `ALN-101`.
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub story_points: u32,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub tech_debt: bool,
    /// Ticket ids that must already be selected before this one can be.
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_impact: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceptance_criteria: Option<String>,
}

impl Ticket {
    /// Create a ticket with no labels, dependencies or impact score.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        priority: Priority,
        story_points: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            priority,
            story_points,
            labels: Vec::new(),
            tech_debt: false,
            dependencies: Vec::new(),
            business_impact: None,
            acceptance_criteria: None,
        }
    }

    /// Effective business impact; missing or zero falls back to the default.
    pub fn business_impact(&self) -> f64 {
        self.business_impact
            .filter(|impact| *impact != 0.0)
            .unwrap_or(DEFAULT_BUSINESS_IMPACT)
    }

    /// Lower-cased `title description labels...` used for keyword matching.
    pub fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.title,
            self.description,
            self.labels.join(" ")
        )
        .to_lowercase()
    }

    /// Check whether the ticket carries a label (exact match).
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}
