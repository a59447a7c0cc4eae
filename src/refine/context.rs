use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::random::{Seed, SeededRandom};

/// Confidence levels a context may report.
pub const CONFIDENCE_LEVELS: [f64; 8] = [0.72, 0.85, 0.91, 0.78, 0.88, 0.95, 0.67, 0.82];

/// Canned reasoning lines a context may report.
pub const REASONING_TEMPLATES: [&str; 5] = [
    "Based on strategic alignment with sprint goals",
    "Prioritizing based on business impact score",
    "Considering technical dependencies and complexity",
    "Aligning with Q3 retention objectives",
    "Factoring in team velocity and capacity",
];

/// Seed and presentation metadata for a refinement session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinementContext {
    pub seed: u32,
    pub confidence: f64,
    pub reasoning: String,
    pub timestamp: DateTime<Utc>,
    pub mock_mode: bool,
}

/// Build a context from `seed`. Everything except the timestamp is a pure
/// function of the seed.
pub fn generate_context(seed: &Seed, mock_mode: bool) -> RefinementContext {
    let numeric = seed.to_u32();
    let mut rng = SeededRandom::new(numeric);

    let confidence = CONFIDENCE_LEVELS[pick_index(&mut rng, CONFIDENCE_LEVELS.len())];
    let reasoning = REASONING_TEMPLATES[pick_index(&mut rng, REASONING_TEMPLATES.len())];

    RefinementContext {
        seed: numeric,
        confidence,
        reasoning: reasoning.to_string(),
        timestamp: Utc::now(),
        mock_mode,
    }
}

fn pick_index(rng: &mut SeededRandom, len: usize) -> usize {
    (rng.next_f64() * len as f64).floor() as usize
}
