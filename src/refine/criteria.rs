use crate::random::SeededRandom;
use crate::ticket::Ticket;

/// Label-specific criteria, appended in this order.
const LABEL_CRITERIA: [(&str, [&str; 2]); 3] = [
    (
        "bug",
        [
            "Bug is no longer reproducible",
            "Regression test added to prevent recurrence",
        ],
    ),
    (
        "feature",
        [
            "Feature works as specified across supported browsers",
            "Documentation updated if needed",
        ],
    ),
    (
        "performance",
        [
            "Performance metrics meet defined thresholds",
            "No degradation in other system areas",
        ],
    ),
];

/// Tickets this large also need integration tests.
const INTEGRATION_TEST_POINTS: u32 = 8;

pub(super) struct Criteria {
    pub text: String,
    pub confidence: f64,
}

pub(super) fn generate(ticket: &Ticket, rng: &mut SeededRandom) -> Criteria {
    let mut items = vec![
        "Implementation matches requirements in description",
        "Code review completed with no blocking feedback",
    ];

    for (label, extra) in LABEL_CRITERIA {
        if ticket.has_label(label) {
            items.extend(extra);
        }
    }
    if ticket.story_points >= INTEGRATION_TEST_POINTS {
        items.push("Integration tests pass");
    }
    items.push("Unit tests cover new/modified code");

    let text = items
        .iter()
        .map(|item| format!("- [ ] {}", item))
        .collect::<Vec<_>>()
        .join("\n");

    Criteria {
        text,
        confidence: rng.next_in(0.8, 0.15),
    }
}
