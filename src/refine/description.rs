use crate::random::SeededRandom;
use crate::ticket::Ticket;

const BUSINESS_CONTEXT: &str = "\n\n**Business Context:**\nThis improvement supports our sprint objectives and addresses user feedback.";

const SUGGESTED_APPROACH: &str = "\n\n**Suggested Approach:**\n1. Analyze current implementation\n2. Design solution\n3. Implement with tests\n4. Review and deploy";

pub(super) struct DescriptionSuggestion {
    pub improved: String,
    pub confidence: f64,
    pub reason: String,
}

/// Which of the what/why/how signals a description carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Completeness {
    pub what: bool,
    pub why: bool,
    pub how: bool,
}

impl Completeness {
    pub(super) fn of(description: &str) -> Self {
        // Lengths are counted in UTF-16 units.
        let length = description.encode_utf16().count();
        let has = |needle: &str| description.contains(needle);
        Self {
            what: length > 50,
            why: has("because") || has("need") || has("should"),
            how: has("implement") || has("approach") || length > 150,
        }
    }

    pub(super) fn missing(self) -> Vec<&'static str> {
        [("what", self.what), ("why", self.why), ("how", self.how)]
            .into_iter()
            .filter(|(_, present)| !present)
            .map(|(name, _)| name)
            .collect()
    }
}

pub(super) fn analyze(ticket: &Ticket, rng: &mut SeededRandom) -> Option<DescriptionSuggestion> {
    let completeness = Completeness::of(&ticket.description);
    let missing = completeness.missing();

    if missing.is_empty() || rng.next_f64() <= 0.2 {
        return None;
    }

    let mut improved = ticket.description.clone();
    if !completeness.why {
        improved.push_str(BUSINESS_CONTEXT);
    }
    if !completeness.how && ticket.story_points >= 5 {
        improved.push_str(SUGGESTED_APPROACH);
    }

    Some(DescriptionSuggestion {
        improved,
        confidence: rng.next_in(0.65, 0.25),
        reason: format!("Added missing sections: {}", missing.join(", ")),
    })
}
