//! Task and action-item extraction from user-authored markdown.
//!
//! Every function here is lenient: malformed or heading-less input yields
//! partial or empty results, never an error.

use std::sync::LazyLock;

use regex::Regex;

use crate::ident::extract_jira_id;
use crate::types::{ActionItem, Task};

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s{0,3}#{1,6}\s+(.*)$").unwrap());
static CHECKBOX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-\s+\[([ xX])\]\s*(.*)$").unwrap());
static ANY_CHECKBOX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*+]\s+\[([ xX])\]\s*(.*)$").unwrap());
static BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[-*+]\s+(.*)$").unwrap());
static BOLD_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:\*\*(.+?)\*\*|__(.+?)__)\s*:?\s*$").unwrap());

/// Titles that open an action-items section. Matched against the normalized
/// marker text by equality or prefix.
const ACTION_ITEM_TITLES: &[&str] = &[
    "action items",
    "action item",
    "next steps",
    "next step",
    "to-dos",
    "to-do",
    "todos",
    "todo",
    "to dos",
    "follow-ups",
    "follow ups",
    "followups",
];

// ── Tasks ──

/// Extract every checkbox line, tagged with the nearest heading above it.
pub fn parse_tasks(content: &str) -> Vec<Task> {
    let mut tasks = Vec::new();
    let mut section = String::new();

    for line in content.lines() {
        if let Some(title) = heading_text(line) {
            section = title.to_string();
            continue;
        }
        let Some((complete, text)) = checkbox_line(line) else {
            continue;
        };
        tasks.push(Task {
            text: text.to_string(),
            section: section.clone(),
            complete,
            jira_id: extract_jira_id(text),
        });
    }

    tasks
}

// ── Action items ──

/// Collect checkbox and plain bullet lines found under an action-items
/// section ("Action items", "Next steps", "To-dos", ...).
pub fn parse_action_items(content: &str) -> Vec<ActionItem> {
    let mut items = Vec::new();
    let mut in_section = false;

    for line in content.lines() {
        if let Some(is_action) = section_marker(line) {
            in_section = is_action;
            continue;
        }
        if !in_section {
            continue;
        }
        let text = if let Some(caps) = ANY_CHECKBOX.captures(line) {
            caps.get(2).map_or("", |m| m.as_str()).trim()
        } else if let Some(caps) = BULLET.captures(line) {
            caps.get(1).map_or("", |m| m.as_str()).trim()
        } else {
            continue;
        };
        if text.is_empty() {
            continue;
        }
        items.push(ActionItem {
            text: text.to_string(),
            jira_id: extract_jira_id(text),
        });
    }

    items
}

/// Whether any line opens an action-items section.
pub fn has_action_items_section(content: &str) -> bool {
    content.lines().any(|line| section_marker(line) == Some(true))
}

// ── Line classification ──

/// Trimmed text of an ATX heading (levels 1-6), or `None` for other lines.
pub fn heading_text(line: &str) -> Option<&str> {
    HEADING
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
}

/// Parse a `- [ ] text` / `- [x] text` line into `(complete, text)`.
/// Lines with no text after the checkbox are not tasks.
pub fn checkbox_line(line: &str) -> Option<(bool, &str)> {
    let caps = CHECKBOX.captures(line)?;
    let text = caps.get(2)?.as_str().trim();
    if text.is_empty() {
        return None;
    }
    Some((caps[1].eq_ignore_ascii_case("x"), text))
}

fn bold_text(line: &str) -> Option<&str> {
    let caps = BOLD_ONLY.captures(line)?;
    caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str())
}

/// Classify `line` as a section marker.
///
/// Headings and bold-only lines always start a new section; the result says
/// whether that section is an action-items one. A bare line is a marker only
/// when it names an action-items section itself.
fn section_marker(line: &str) -> Option<bool> {
    if let Some(title) = heading_text(line).or_else(|| bold_text(line)) {
        return Some(is_action_items_title(title));
    }
    let trimmed = line.trim();
    if trimmed.is_empty() || BULLET.is_match(line) {
        return None;
    }
    is_action_items_title(trimmed).then_some(true)
}

fn is_action_items_title(title: &str) -> bool {
    let normalized = normalize_marker(title);
    ACTION_ITEM_TITLES.iter().any(|t| normalized.starts_with(t))
}

/// Lowercase, collapse whitespace, strip trailing punctuation and dashes.
fn normalize_marker(title: &str) -> String {
    let collapsed = title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    collapsed
        .trim_end_matches(|c: char| matches!(c, ':' | '-' | '–' | '—' | '.') || c.is_whitespace())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── parse_tasks tests ──

    #[test]
    fn tasks_tagged_with_current_section() {
        let content = "\
# 2024-01-03

## Focus today
- [ ] Write report
- [x] Review PR FSW-12

## Later
- [X] Book flights
- [ ] Plan offsite [OPS-4]
";
        let tasks = parse_tasks(content);
        assert_eq!(tasks.len(), 4);
        assert_eq!(tasks[0].text, "Write report");
        assert_eq!(tasks[0].section, "Focus today");
        assert!(!tasks[0].complete);
        assert_eq!(tasks[0].jira_id, None);

        assert!(tasks[1].complete);
        assert_eq!(tasks[1].jira_id.as_deref(), Some("FSW-12"));

        assert_eq!(tasks[2].section, "Later");
        assert!(tasks[2].complete, "uppercase X counts as complete");
        assert_eq!(tasks[3].jira_id.as_deref(), Some("OPS-4"));
    }

    #[test]
    fn tasks_before_any_heading_have_empty_section() {
        let tasks = parse_tasks("- [ ] Loose task\n\n### Deep heading\n- [ ] Nested\n");
        assert_eq!(tasks[0].section, "");
        assert_eq!(tasks[1].section, "Deep heading");
    }

    #[test]
    fn all_heading_levels_update_section() {
        for level in 1..=6 {
            let content = format!("{} Level\n- [ ] item\n", "#".repeat(level));
            assert_eq!(parse_tasks(&content)[0].section, "Level", "level {level}");
        }
        let tasks = parse_tasks("####### Not a heading\n- [ ] item\n");
        assert_eq!(tasks[0].section, "");
    }

    #[test]
    fn non_checkbox_lines_ignored() {
        let content = "\
## Notes
- plain bullet
* [ ] star checkbox is not a task line
#hashtag
- [ ]
Some paragraph text.
  - [ ] indented subtask
";
        let tasks = parse_tasks(content);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].text, "indented subtask");
        assert_eq!(tasks[0].section, "Notes");
    }

    #[test]
    fn empty_and_garbage_input() {
        assert!(parse_tasks("").is_empty());
        assert!(parse_tasks("just text\n\n---\n]]][[[").is_empty());
    }

    // ── parse_action_items tests ──

    #[test]
    fn action_items_under_heading() {
        let content = "\
# Standup

## Discussion
- talked about the release

## Action Items
- [ ] Send notes to team
- Follow up with infra on FSW-88
* Update roadmap
+ Check budget

## Other
- not an action
";
        let items = parse_action_items(content);
        let texts: Vec<&str> = items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Send notes to team",
                "Follow up with infra on FSW-88",
                "Update roadmap",
                "Check budget"
            ]
        );
        assert_eq!(items[1].jira_id.as_deref(), Some("FSW-88"));
    }

    #[test]
    fn action_items_under_bold_marker() {
        let content = "\
**Summary**
- shipped v2

**Next Steps:**
- [x] Tag release
- Write changelog
";
        let items = parse_action_items(content);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].text, "Tag release");
        assert_eq!(items[1].text, "Write changelog");
    }

    #[test]
    fn action_items_under_bare_marker() {
        let content = "\
Meeting notes
- context bullet

To-dos —
- Email vendor
- Renew license
";
        let items = parse_action_items(content);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].text, "Email vendor");
    }

    #[test]
    fn bare_marker_prefix_match() {
        let content = "Action items for Alex:\n- Draft proposal\n";
        let items = parse_action_items(content);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "Draft proposal");
    }

    #[test]
    fn heading_marker_is_case_and_space_insensitive() {
        let content = "###   ACTION    items ###\n- one\n";
        // trailing '#' characters are part of the heading text, so the
        // normalized title still begins with "action items"
        assert_eq!(parse_action_items(content).len(), 1);
    }

    #[test]
    fn no_action_section_yields_nothing() {
        let content = "## Notes\n- a\n- [ ] b\n";
        assert!(parse_action_items(content).is_empty());
        assert!(!has_action_items_section(content));
    }

    // ── has_action_items_section tests ──

    #[test]
    fn detects_each_marker_style() {
        assert!(has_action_items_section("## Next steps\n"));
        assert!(has_action_items_section("**Follow-ups**\n"));
        assert!(has_action_items_section("todos:\n"));
        assert!(!has_action_items_section("- next steps as a bullet\n"));
        assert!(!has_action_items_section("## Decisions\n"));
        assert!(!has_action_items_section(""));
    }
}
