use std::sync::LazyLock;

use regex::Regex;

/// Tracker identifier embedded in free text, e.g. `FSW-12` or `[FSW-12]`.
static JIRA_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b([A-Z]+-\d+)\b").unwrap());

/// Identity key for a task: trimmed, lowercased, whitespace runs collapsed.
///
/// Two phrasings are the same task only if their keys are equal; there is
/// no fuzzy matching.
pub fn normalize_key(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// First tracker identifier in `text`, if any.
pub fn extract_jira_id(text: &str) -> Option<String> {
    JIRA_ID
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}
