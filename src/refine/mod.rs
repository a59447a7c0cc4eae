//! Deterministic ticket refinement.
//!
//! [`refine_ticket`] runs a fixed sequence of analyses (title, description,
//! acceptance criteria, story points, risks) that share a single seeded
//! generator. Each analysis may propose an [`Improvement`]; the proposals are
//! applied to a copy of the ticket and never to the input.

mod context;
mod criteria;
mod description;
mod points;
mod risks;
mod title;
mod types;

#[cfg(test)]
mod tests;

pub use context::{generate_context, RefinementContext, CONFIDENCE_LEVELS, REASONING_TEMPLATES};
pub use risks::{Risk, RiskKind, Severity};
pub use types::{
    AiWarning, Field, FieldValue, Improvement, ImprovementKind, RefinedTicket, RefinementResult,
};

use tracing::debug;

use crate::random::{string_to_seed, SeededRandom};
use crate::ticket::Ticket;

/// Improvements below this confidence are surfaced as warnings.
pub const LOW_CONFIDENCE: f64 = 0.7;

/// Propose improvements for `ticket`.
///
/// The generator is seeded from `context.seed` when it is present and
/// non-zero, otherwise from the ticket id, so refining the same ticket twice
/// yields the same result.
pub fn refine_ticket(ticket: &Ticket, context: Option<&RefinementContext>) -> RefinementResult {
    let seed = context
        .map(|c| c.seed)
        .filter(|seed| *seed != 0)
        .unwrap_or_else(|| string_to_seed(&ticket.id));
    let mut rng = SeededRandom::new(seed);

    let mut improvements = Vec::new();
    let mut refined = RefinedTicket::from(ticket.clone());

    if let Some(suggestion) = title::analyze(&ticket.title, &mut rng) {
        refined.ticket.title = suggestion.improved.clone();
        improvements.push(Improvement {
            field: Field::Title,
            kind: ImprovementKind::Clarity,
            before: Some(FieldValue::Text(ticket.title.clone())),
            after: Some(FieldValue::Text(suggestion.improved)),
            confidence: suggestion.confidence,
            reason: suggestion.reason.to_string(),
        });
    }

    if let Some(suggestion) = description::analyze(ticket, &mut rng) {
        refined.ticket.description = suggestion.improved.clone();
        improvements.push(Improvement {
            field: Field::Description,
            kind: ImprovementKind::Completeness,
            before: Some(FieldValue::Text(ticket.description.clone())),
            after: Some(FieldValue::Text(suggestion.improved)),
            confidence: suggestion.confidence,
            reason: suggestion.reason,
        });
    }

    let criteria = criteria::generate(ticket, &mut rng);
    refined.ticket.acceptance_criteria = Some(criteria.text.clone());
    improvements.push(Improvement {
        field: Field::AcceptanceCriteria,
        kind: ImprovementKind::Addition,
        before: ticket.acceptance_criteria.clone().map(FieldValue::Text),
        after: Some(FieldValue::Text(criteria.text)),
        confidence: criteria.confidence,
        reason: "Added structured acceptance criteria for clarity".to_string(),
    });

    if let Some(suggestion) = points::analyze(ticket, &mut rng) {
        refined.suggested_points = Some(suggestion.recommended);
        improvements.push(Improvement {
            field: Field::StoryPoints,
            kind: ImprovementKind::Adjustment,
            before: Some(FieldValue::Points(ticket.story_points)),
            after: Some(FieldValue::Points(suggestion.recommended)),
            confidence: suggestion.confidence,
            reason: suggestion.reason,
        });
    }

    let risks = risks::identify(ticket, &mut rng);
    if !risks.is_empty() {
        improvements.push(Improvement {
            field: Field::Risks,
            kind: ImprovementKind::Warning,
            before: None,
            after: Some(FieldValue::Risks(risks.clone())),
            confidence: rng.next_in(0.75, 0.2),
            reason: "Potential risks identified that may affect implementation".to_string(),
        });
        refined.risks = Some(risks);
    }

    let overall_confidence = overall_confidence(&improvements);
    let ai_warnings = improvements
        .iter()
        .filter(|i| i.confidence < LOW_CONFIDENCE)
        .map(|i| AiWarning {
            field: i.field,
            message: format!(
                "Low confidence ({}%) - review recommended",
                (i.confidence * 100.0).round()
            ),
        })
        .collect();

    debug!(
        ticket = %ticket.id,
        seed,
        improvements = improvements.len(),
        overall_confidence,
        "Refined ticket"
    );

    RefinementResult {
        original: ticket.clone(),
        refined,
        improvements,
        overall_confidence,
        ai_warnings,
    }
}

/// Mean confidence rounded to two decimals; 0.0 with no improvements.
fn overall_confidence(improvements: &[Improvement]) -> f64 {
    if improvements.is_empty() {
        return 0.0;
    }
    let mean = improvements.iter().map(|i| i.confidence).sum::<f64>() / improvements.len() as f64;
    (mean * 100.0).round() / 100.0
}
