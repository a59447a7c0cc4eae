/// Strategy vocabulary recognised by the scorer, in match order.
pub const STRATEGY_KEYWORDS: [&str; 15] = [
    "retention",
    "performance",
    "security",
    "bug",
    "feature",
    "auth",
    "ux",
    "reliability",
    "optimization",
    "integration",
    "q3",
    "quick",
    "critical",
    "urgent",
    "debt",
];

/// Vocabulary keywords contained in the strategy text (case-insensitive).
///
/// # Examples
/// ```
/// use align::planning::extract_keywords;
/// assert_eq!(extract_keywords("Fix Q3 retention issues"), vec!["retention", "q3"]);
/// assert!(extract_keywords("").is_empty());
/// ```
pub fn extract_keywords(strategy: &str) -> Vec<&'static str> {
    let lower = strategy.to_lowercase();
    STRATEGY_KEYWORDS
        .iter()
        .copied()
        .filter(|kw| lower.contains(kw))
        .collect()
}

/// Subset of `keywords` found in an already lower-cased ticket text.
pub fn matched_keywords<'a>(keywords: &[&'a str], ticket_text: &str) -> Vec<&'a str> {
    keywords
        .iter()
        .copied()
        .filter(|kw| ticket_text.contains(kw))
        .collect()
}
