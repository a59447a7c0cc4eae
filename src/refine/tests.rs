use super::*;
use crate::random::Seed;
use crate::ticket::{Backlog, Priority, Ticket};

fn demo_ticket(id: &str) -> Ticket {
    Backlog::embedded().unwrap().ticket(id).unwrap().clone()
}

fn fields(result: &RefinementResult) -> Vec<Field> {
    result.improvements.iter().map(|i| i.field).collect()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 5e-5,
        "expected {expected}, got {actual}"
    );
}

fn context(seed: u32) -> RefinementContext {
    generate_context(&Seed::from(seed), true)
}

#[test]
fn test_refine_adds_action_verb() {
    let result = refine_ticket(&demo_ticket("ALN-101"), None);

    assert_eq!(fields(&result), vec![Field::Title, Field::AcceptanceCriteria]);
    let title = &result.improvements[0];
    assert_eq!(title.kind, ImprovementKind::Clarity);
    assert_eq!(
        title.after.as_ref().and_then(FieldValue::as_text),
        Some("Implement: onboarding checklist drops users after step 3")
    );
    assert_close(title.confidence, 0.8504);
    assert_eq!(title.reason, "Added action verb for clarity");
    assert_eq!(
        result.refined.ticket.title,
        "Implement: onboarding checklist drops users after step 3"
    );
    assert_eq!(result.overall_confidence, 0.85);
    assert!(result.ai_warnings.is_empty());
}

#[test]
fn test_refine_low_confidence_description_warns() {
    let result = refine_ticket(&demo_ticket("ALN-102"), None);

    assert_eq!(fields(&result), vec![Field::Description, Field::AcceptanceCriteria]);
    let description = &result.improvements[0];
    assert_eq!(description.reason, "Added missing sections: what, why, how");
    assert_close(description.confidence, 0.6818);
    assert_eq!(
        result.refined.ticket.description,
        "Sessions expire after 5 minutes on iOS Safari.\n\n**Business Context:**\nThis improvement supports our sprint objectives and addresses user feedback."
    );
    assert_eq!(result.overall_confidence, 0.76);
    assert_eq!(
        result.ai_warnings,
        vec![AiWarning {
            field: Field::Description,
            message: "Low confidence (68%) - review recommended".to_string(),
        }]
    );
}

#[test]
fn test_refine_well_formed_ticket_only_gets_criteria() {
    let result = refine_ticket(&demo_ticket("ALN-103"), None);
    assert_eq!(fields(&result), vec![Field::AcceptanceCriteria]);
    assert_close(result.improvements[0].confidence, 0.9351);
    assert_eq!(result.overall_confidence, 0.94);

    let criteria = result.refined.ticket.acceptance_criteria.unwrap();
    assert!(criteria.contains("- [ ] Performance metrics meet defined thresholds"));
    assert!(criteria.ends_with("- [ ] Unit tests cover new/modified code"));
}

#[test]
fn test_refine_tech_debt_ticket_flags_technical_risk() {
    let result = refine_ticket(&demo_ticket("ALN-104"), None);

    assert_eq!(
        fields(&result),
        vec![Field::Description, Field::AcceptanceCriteria, Field::Risks]
    );
    assert_eq!(result.improvements[0].reason, "Added missing sections: why, how");
    let description = result.refined.ticket.description.as_str();
    assert!(description.contains("**Business Context:**"));
    assert!(description.contains("**Suggested Approach:**\n1. Analyze current implementation"));

    let risks = result.refined.risks.as_ref().unwrap();
    assert_eq!(risks.len(), 1);
    assert_eq!(risks[0].kind, RiskKind::Technical);
    assert_eq!(risks[0].severity, Severity::Low);
    assert_close(result.improvements[2].confidence, 0.7725);
    assert_eq!(result.overall_confidence, 0.8);
}

#[test]
fn test_refine_vague_title_and_low_points() {
    let result = refine_ticket(&demo_ticket("ALN-108"), None);

    assert_eq!(
        fields(&result),
        vec![
            Field::Title,
            Field::Description,
            Field::AcceptanceCriteria,
            Field::StoryPoints,
        ]
    );
    assert_eq!(result.refined.ticket.title, "Implement: misc stuff in settings page");
    let points = &result.improvements[3];
    assert_eq!(points.before, Some(FieldValue::Points(2)));
    assert_eq!(points.after, Some(FieldValue::Points(5)));
    assert_eq!(
        points.reason,
        "Complexity indicators suggest 5-8 points may be more accurate"
    );
    assert_eq!(result.refined.suggested_points, Some(5));
    assert_eq!(result.refined.ticket.story_points, 2);
    assert_eq!(result.overall_confidence, 0.82);
    assert_eq!(
        result.ai_warnings,
        vec![AiWarning {
            field: Field::StoryPoints,
            message: "Low confidence (69%) - review recommended".to_string(),
        }]
    );
}

#[test]
fn test_refine_large_dependent_ticket() {
    let result = refine_ticket(&demo_ticket("ALN-115"), None);

    assert_eq!(result.refined.ticket.title, "Implement: sSO integration with Okta");
    assert_eq!(
        result.improvement(Field::Description).unwrap().reason,
        "Added missing sections: how"
    );
    let points = result.improvement(Field::StoryPoints).unwrap();
    assert_eq!(
        points.reason,
        "Consider breaking down into smaller tickets (suggested: 8 points)"
    );
    assert_close(points.confidence, 0.7905);

    let kinds: Vec<RiskKind> = result
        .refined
        .risks
        .as_ref()
        .unwrap()
        .iter()
        .map(|r| r.kind)
        .collect();
    assert_eq!(kinds, vec![RiskKind::Dependency, RiskKind::Scope]);
    assert_eq!(
        result.refined.risks.as_ref().unwrap()[0].message,
        "Depends on 1 other ticket(s)"
    );
    assert_eq!(result.overall_confidence, 0.81);
}

#[test]
fn test_refine_estimate_risk_draw() {
    let result = refine_ticket(&demo_ticket("ALN-106"), None);
    let kinds: Vec<RiskKind> = result
        .refined
        .risks
        .as_ref()
        .unwrap()
        .iter()
        .map(|r| r.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![RiskKind::Scope, RiskKind::Technical, RiskKind::Estimate]
    );
    assert_close(result.improvement(Field::Risks).unwrap().confidence, 0.8541);
    assert_eq!(result.overall_confidence, 0.88);
}

#[test]
fn test_refine_with_context_seed() {
    let mut ticket = Ticket::new("X-1", "Update readme", Priority::Low, 20);
    ticket.description = "short".to_string();

    let result = refine_ticket(&ticket, Some(&context(7)));

    assert_eq!(
        fields(&result),
        vec![Field::AcceptanceCriteria, Field::StoryPoints, Field::Risks]
    );
    assert_eq!(
        result.improvements[0].after.as_ref().and_then(FieldValue::as_text),
        Some(
            "- [ ] Implementation matches requirements in description\n\
             - [ ] Code review completed with no blocking feedback\n\
             - [ ] Integration tests pass\n\
             - [ ] Unit tests cover new/modified code"
        )
    );
    assert_close(result.improvements[0].confidence, 0.8092937386361883);
    assert_close(result.improvements[1].confidence, 0.7942269081948325);
    assert_close(result.improvements[2].confidence, 0.8542890537064523);
    assert_eq!(
        result.improvements[1].reason,
        "Consider breaking down into smaller tickets (suggested: 3 points)"
    );
    assert_eq!(result.refined.suggested_points, Some(3));
    assert_eq!(result.overall_confidence, 0.82);
    assert!(result.ai_warnings.is_empty());
}

#[test]
fn test_zero_context_seed_falls_back_to_ticket_id() {
    let ticket = demo_ticket("ALN-101");
    let mut ctx = context(7);
    ctx.seed = 0;
    assert_eq!(refine_ticket(&ticket, Some(&ctx)), refine_ticket(&ticket, None));
}

#[test]
fn test_refine_does_not_mutate_original() {
    let ticket = demo_ticket("ALN-108");
    let result = refine_ticket(&ticket, None);
    assert_eq!(result.original, ticket);
    assert_ne!(result.refined.ticket.title, ticket.title);
}

#[test]
fn test_existing_criteria_reported_as_before() {
    let mut ticket = demo_ticket("ALN-103");
    ticket.acceptance_criteria = Some("- [ ] Loads in 1s".to_string());
    let result = refine_ticket(&ticket, None);
    assert_eq!(
        result.improvement(Field::AcceptanceCriteria).unwrap().before,
        Some(FieldValue::Text("- [ ] Loads in 1s".to_string()))
    );
}

#[test]
fn test_warnings_match_low_confidence_improvements() {
    for ticket in Backlog::embedded().unwrap().tickets {
        let result = refine_ticket(&ticket, None);
        let low: Vec<Field> = result
            .improvements
            .iter()
            .filter(|i| i.confidence < LOW_CONFIDENCE)
            .map(|i| i.field)
            .collect();
        let warned: Vec<Field> = result.ai_warnings.iter().map(|w| w.field).collect();
        assert_eq!(low, warned, "ticket {}", ticket.id);
        assert!(result
            .improvements
            .iter()
            .any(|i| i.field == Field::AcceptanceCriteria));
    }
}

#[test]
fn test_refinement_serializes_camel_case() {
    let result = refine_ticket(&demo_ticket("ALN-115"), None);
    let json = serde_json::to_value(&result).unwrap();
    assert!(json["overallConfidence"].is_number());
    assert_eq!(json["refined"]["suggestedPoints"], 8);
    assert_eq!(json["refined"]["risks"][0]["type"], "dependency");
    assert_eq!(json["improvements"][0]["type"], "clarity");
    assert_eq!(json["improvements"][3]["field"], "storyPoints");
    assert_eq!(json["improvements"][4]["before"], serde_json::Value::Null);

    let back: RefinementResult = serde_json::from_value(json).unwrap();
    assert_eq!(back.refined.suggested_points, Some(8));
}

#[test]
fn test_generate_context_is_seeded() {
    let ctx = context(7);
    assert_eq!(ctx.seed, 7);
    assert_eq!(ctx.confidence, 0.72);
    assert_eq!(ctx.reasoning, REASONING_TEMPLATES[0]);
    assert!(ctx.mock_mode);

    let ctx = generate_context(&Seed::Number(42), false);
    assert_eq!(ctx.confidence, 0.88);
    assert_eq!(ctx.reasoning, "Considering technical dependencies and complexity");
    assert!(!ctx.mock_mode);

    let text = generate_context(&Seed::from("ALN-101"), true);
    assert_eq!(text.seed, crate::random::string_to_seed("ALN-101"));
}
