use crate::random::SeededRandom;
use crate::ticket::Ticket;

/// Complexity tiers checked in order; the first tier with a match wins.
const COMPLEXITY_TIERS: [(Complexity, &[&str]); 3] = [
    (
        Complexity::High,
        &["refactor", "migrate", "integrate", "security", "auth"],
    ),
    (Complexity::Medium, &["implement", "add", "create", "optimize"]),
    (Complexity::Low, &["fix", "update", "change"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Complexity {
    High,
    Medium,
    Low,
}

impl Complexity {
    pub(super) fn estimate(ticket: &Ticket) -> Self {
        let text = format!("{} {}", ticket.title, ticket.description).to_lowercase();
        COMPLEXITY_TIERS
            .iter()
            .find(|(_, indicators)| indicators.iter().any(|i| text.contains(i)))
            .map(|(tier, _)| *tier)
            .unwrap_or(Complexity::Medium)
    }

    /// Inclusive story point range considered plausible.
    pub(super) fn range(self) -> (u32, u32) {
        match self {
            Self::High => (8, 13),
            Self::Medium => (5, 8),
            Self::Low => (2, 3),
        }
    }
}

pub(super) struct PointsSuggestion {
    pub recommended: u32,
    pub confidence: f64,
    pub reason: String,
}

pub(super) fn analyze(ticket: &Ticket, rng: &mut SeededRandom) -> Option<PointsSuggestion> {
    let (min, max) = Complexity::estimate(ticket).range();

    if ticket.story_points < min {
        return Some(PointsSuggestion {
            recommended: min,
            confidence: rng.next_in(0.6, 0.25),
            reason: format!(
                "Complexity indicators suggest {}-{} points may be more accurate",
                min, max
            ),
        });
    }

    if ticket.story_points > max + 2 {
        return Some(PointsSuggestion {
            recommended: max,
            confidence: rng.next_in(0.55, 0.25),
            reason: format!(
                "Consider breaking down into smaller tickets (suggested: {} points)",
                max
            ),
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticket::Priority;

    #[test]
    fn test_first_matching_tier_wins() {
        let mut ticket = Ticket::new("T-1", "Fix auth redirect", Priority::High, 3);
        assert_eq!(Complexity::estimate(&ticket), Complexity::High);

        ticket.title = "Fix redirect".to_string();
        assert_eq!(Complexity::estimate(&ticket), Complexity::Low);

        ticket.title = "Dark theme".to_string();
        assert_eq!(Complexity::estimate(&ticket), Complexity::Medium);
    }

    #[test]
    fn test_points_within_tolerance_are_left_alone() {
        // Low tier is 2-3; up to 5 is tolerated.
        let ticket = Ticket::new("T-2", "Fix typo", Priority::Low, 5);
        assert!(analyze(&ticket, &mut SeededRandom::new(1)).is_none());

        let ticket = Ticket::new("T-3", "Fix typo", Priority::Low, 6);
        let suggestion = analyze(&ticket, &mut SeededRandom::new(1)).unwrap();
        assert_eq!(suggestion.recommended, 3);
    }
}
