use once_cell::sync::Lazy;
use regex::Regex;

use crate::random::SeededRandom;

/// Leading verbs that already make a title actionable.
const ACTION_VERBS: [&str; 8] = [
    "Implement", "Fix", "Add", "Optimize", "Refactor", "Update", "Create", "Remove",
];

static VAGUE_WORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)stuff|things|misc|various").expect("valid vague word regex"));

pub(super) struct TitleSuggestion {
    pub improved: String,
    pub confidence: f64,
    pub reason: &'static str,
}

pub(super) fn analyze(title: &str, rng: &mut SeededRandom) -> Option<TitleSuggestion> {
    let has_verb = ACTION_VERBS.iter().any(|verb| title.starts_with(verb));

    // The draw only happens for titles without a verb.
    if !has_verb && rng.next_f64() > 0.3 {
        let improved = format!("{}: {}", verb_for(title), lowercase_first(title));
        return Some(TitleSuggestion {
            improved,
            confidence: rng.next_in(0.8, 0.15),
            reason: "Added action verb for clarity",
        });
    }

    if VAGUE_WORDS.is_match(title) {
        return Some(TitleSuggestion {
            improved: VAGUE_WORDS.replace_all(title, "functionality").into_owned(),
            confidence: rng.next_in(0.7, 0.2),
            reason: "Replaced vague terminology with specific language",
        });
    }

    None
}

fn verb_for(title: &str) -> &'static str {
    let lower = title.to_lowercase();
    let has = |needle: &str| lower.contains(needle);
    if has("bug") || has("fix") {
        "Fix"
    } else if has("optim") || has("performance") {
        "Optimize"
    } else if has("refactor") {
        "Refactor"
    } else if has("add") || has("support") {
        "Add"
    } else {
        "Implement"
    }
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verb_for_content() {
        assert_eq!(verb_for("Login bug on Safari"), "Fix");
        assert_eq!(verb_for("Image optimization"), "Optimize");
        assert_eq!(verb_for("Billing refactor"), "Refactor");
        assert_eq!(verb_for("Dark mode support"), "Add");
        assert_eq!(verb_for("Churn pipeline"), "Implement");
    }

    #[test]
    fn test_lowercase_first() {
        assert_eq!(lowercase_first("SSO integration"), "sSO integration");
        assert_eq!(lowercase_first(""), "");
    }

    #[test]
    fn test_titles_with_verb_skip_draw() {
        let mut rng = SeededRandom::new(1);
        let mut untouched = SeededRandom::new(1);
        assert!(analyze("Fix login redirect", &mut rng).is_none());
        assert_eq!(rng.next_f64(), untouched.next_f64());
    }

    #[test]
    fn test_vague_words_replaced_case_insensitively() {
        // Verb present, so only the vague word rule applies.
        let mut rng = SeededRandom::new(1);
        let suggestion = analyze("Update MISC things", &mut rng).unwrap();
        assert_eq!(suggestion.improved, "Update functionality functionality");
        assert!((0.7..0.9).contains(&suggestion.confidence));
    }
}
