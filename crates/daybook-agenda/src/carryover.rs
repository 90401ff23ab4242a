use std::collections::{HashMap, HashSet};

use daybook_core::{normalize_key, DailyAgendaSnapshot, UnclearItem};
use time::macros::format_description;
use time::Date;

use crate::draft::FOCUS_TODAY_HEADING;

/// Consecutive incomplete days before a task is flagged.
pub const INCOMPLETE_STREAK_THRESHOLD: u32 = 3;
/// Consecutive days in "Focus today" before a task is flagged.
pub const FOCUS_STREAK_THRESHOLD: u32 = 2;

const CARRY_OVER_QUESTION: &str =
    "This keeps carrying over. Is it still relevant, blocked on something, or should it move to later?";
const FOCUS_QUESTION: &str =
    "This has been a focus item without getting done. What is blocking it, or should it be broken down?";

// ── Streaks ──

#[derive(Debug, Clone)]
struct Streak {
    count: u32,
    /// Date of the first-iterated snapshot of the run. Snapshots arrive most
    /// recent first, so this is the newest day, not the earliest.
    start_date: String,
    text: String,
}

impl Streak {
    fn extend(prior: Option<&Streak>, text: &str, date: &str) -> Self {
        match prior {
            Some(p) => Streak {
                count: p.count + 1,
                start_date: p.start_date.clone(),
                text: p.text.clone(),
            },
            None => Streak {
                count: 1,
                start_date: date.to_string(),
                text: text.to_string(),
            },
        }
    }
}

type StreakMap = HashMap<String, Streak>;

// ── Detection ──

/// Flag tasks that stayed incomplete across consecutive daily notes.
///
/// `snapshots` must be ordered most recent first. A task is flagged once it
/// is incomplete on [`INCOMPLETE_STREAK_THRESHOLD`] consecutive days, or sits
/// under "Focus today" on [`FOCUS_STREAK_THRESHOLD`] consecutive days. Each
/// task is flagged at most once. Any date gap resets every streak.
pub fn detect_unclear_items(snapshots: &[DailyAgendaSnapshot]) -> Vec<UnclearItem> {
    let mut all_streaks = StreakMap::new();
    let mut focus_streaks = StreakMap::new();
    let mut flagged: HashSet<String> = HashSet::new();
    let mut items = Vec::new();
    let mut prev_date: Option<Option<Date>> = None;

    for snapshot in snapshots {
        let date = parse_day(&snapshot.date);
        if let Some(prev) = prev_date {
            if !is_consecutive(prev, date) {
                tracing::debug!(date = %snapshot.date, "date gap, resetting carry-over streaks");
                all_streaks.clear();
                focus_streaks.clear();
            }
        }
        prev_date = Some(date);

        let mut today_all: Vec<(String, &str)> = Vec::new();
        let mut today_focus: HashMap<String, &str> = HashMap::new();
        for task in snapshot.incomplete_tasks() {
            let key = normalize_key(&task.text);
            if task.section == FOCUS_TODAY_HEADING {
                today_focus.entry(key.clone()).or_insert(task.text.as_str());
            }
            if !today_all.iter().any(|(k, _)| *k == key) {
                today_all.push((key, task.text.as_str()));
            }
        }

        let mut next_all = StreakMap::new();
        let mut next_focus = StreakMap::new();

        for (key, text) in today_all {
            let streak = Streak::extend(all_streaks.get(&key), text, &snapshot.date);
            if streak.count >= INCOMPLETE_STREAK_THRESHOLD && flagged.insert(key.clone()) {
                tracing::debug!(
                    task = %streak.text,
                    days = streak.count,
                    "flagging carried-over task"
                );
                items.push(UnclearItem {
                    task: streak.text.clone(),
                    source: source_label(&streak),
                    reason: format!("Incomplete for {} consecutive days", streak.count),
                    question: CARRY_OVER_QUESTION.to_string(),
                });
            }

            if let Some(focus_text) = today_focus.get(&key) {
                let focus = Streak::extend(focus_streaks.get(&key), focus_text, &snapshot.date);
                if focus.count >= FOCUS_STREAK_THRESHOLD && flagged.insert(key.clone()) {
                    tracing::debug!(
                        task = %focus.text,
                        days = focus.count,
                        "flagging stalled focus task"
                    );
                    items.push(UnclearItem {
                        task: focus.text.clone(),
                        source: source_label(&focus),
                        reason: format!(
                            "In \"{FOCUS_TODAY_HEADING}\" for {} consecutive days without completion",
                            focus.count
                        ),
                        question: FOCUS_QUESTION.to_string(),
                    });
                }
                next_focus.insert(key.clone(), focus);
            }

            next_all.insert(key, streak);
        }

        all_streaks = next_all;
        focus_streaks = next_focus;
    }

    items
}

/// Append `detected` items whose task is not already in `supplied`,
/// comparing normalized task text.
pub fn merge_unclear_items(
    supplied: Vec<UnclearItem>,
    detected: Vec<UnclearItem>,
) -> Vec<UnclearItem> {
    let known: HashSet<String> = supplied.iter().map(|i| normalize_key(&i.task)).collect();
    let mut merged = supplied;
    merged.extend(
        detected
            .into_iter()
            .filter(|item| !known.contains(&normalize_key(&item.task))),
    );
    merged
}

fn source_label(streak: &Streak) -> String {
    format!("Daily notes ({})", streak.start_date)
}

fn parse_day(date: &str) -> Option<Date> {
    Date::parse(date.trim(), format_description!("[year]-[month]-[day]")).ok()
}

/// Exactly one calendar day apart, in either direction. An unreadable date
/// never continues a streak.
fn is_consecutive(prev: Option<Date>, current: Option<Date>) -> bool {
    match (prev, current) {
        (Some(a), Some(b)) => (a - b).whole_days().abs() == 1,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(date: &str, body: &str) -> DailyAgendaSnapshot {
        DailyAgendaSnapshot::from_content(date, body)
    }

    // ── incomplete streak tests ──

    #[test]
    fn three_consecutive_days_flags_once() {
        let body = "## Work\n- [ ] Write report\n";
        let snaps = vec![
            note("2024-01-03", body),
            note("2024-01-02", body),
            note("2024-01-01", body),
        ];
        let items = detect_unclear_items(&snaps);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].task, "Write report");
        assert_eq!(items[0].reason, "Incomplete for 3 consecutive days");
        assert_eq!(items[0].question, CARRY_OVER_QUESTION);
    }

    #[test]
    fn gap_breaks_streak() {
        let body = "## Work\n- [ ] Write report\n";
        let snaps = vec![note("2024-01-03", body), note("2024-01-01", body)];
        assert!(detect_unclear_items(&snaps).is_empty());
    }

    #[test]
    fn gap_resets_unrelated_tasks_too() {
        let snaps = vec![
            note("2024-01-05", "- [ ] A\n- [ ] B\n"),
            note("2024-01-04", "- [ ] A\n- [ ] B\n"),
            // gap: 01-03 missing
            note("2024-01-02", "- [ ] A\n"),
            note("2024-01-01", "- [ ] A\n"),
        ];
        assert!(detect_unclear_items(&snaps).is_empty());
    }

    #[test]
    fn completed_task_breaks_streak() {
        let snaps = vec![
            note("2024-01-03", "- [ ] Write report\n"),
            note("2024-01-02", "- [x] Write report\n"),
            note("2024-01-01", "- [ ] Write report\n"),
        ];
        assert!(detect_unclear_items(&snaps).is_empty());
    }

    #[test]
    fn key_ignores_case_and_whitespace_only() {
        let snaps = vec![
            note("2024-01-03", "- [ ] write   REPORT\n"),
            note("2024-01-02", "- [ ] Write report\n"),
            note("2024-01-01", "- [ ] Write report\n"),
        ];
        let items = detect_unclear_items(&snaps);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].task, "write   REPORT", "text comes from the first day walked");

        let reworded = vec![
            note("2024-01-03", "- [ ] Write the report\n"),
            note("2024-01-02", "- [ ] Write report\n"),
            note("2024-01-01", "- [ ] Write report\n"),
        ];
        assert!(detect_unclear_items(&reworded).is_empty());
    }

    #[test]
    fn start_date_is_first_walked_day() {
        let body = "- [ ] Write report\n";
        let snaps = vec![
            note("2024-01-03", body),
            note("2024-01-02", body),
            note("2024-01-01", body),
        ];
        let items = detect_unclear_items(&snaps);
        assert_eq!(items[0].source, "Daily notes (2024-01-03)");
    }

    #[test]
    fn unparseable_date_resets() {
        let body = "- [ ] Write report\n";
        let snaps = vec![
            note("2024-01-03", body),
            note("someday", body),
            note("2024-01-01", body),
        ];
        assert!(detect_unclear_items(&snaps).is_empty());
    }

    #[test]
    fn oldest_first_order_also_counts_as_consecutive() {
        let body = "- [ ] Write report\n";
        let snaps = vec![
            note("2024-01-01", body),
            note("2024-01-02", body),
            note("2024-01-03", body),
        ];
        assert_eq!(detect_unclear_items(&snaps).len(), 1);
    }

    #[test]
    fn month_boundary_is_consecutive() {
        let body = "- [ ] Close books\n";
        let snaps = vec![
            note("2024-03-01", body),
            note("2024-02-29", body),
            note("2024-02-28", body),
        ];
        assert_eq!(detect_unclear_items(&snaps).len(), 1);
    }

    // ── focus streak tests ──

    #[test]
    fn two_days_in_focus_flags() {
        let body = "## Focus today\n- [ ] Ship release\n";
        let snaps = vec![note("2024-01-02", body), note("2024-01-01", body)];
        let items = detect_unclear_items(&snaps);
        assert_eq!(items.len(), 1);
        assert_eq!(
            items[0].reason,
            "In \"Focus today\" for 2 consecutive days without completion"
        );
        assert_eq!(items[0].question, FOCUS_QUESTION);
    }

    #[test]
    fn focus_streak_needs_focus_section_each_day() {
        let snaps = vec![
            note("2024-01-02", "## Focus today\n- [ ] Ship release\n"),
            note("2024-01-01", "## Later\n- [ ] Ship release\n"),
        ];
        assert!(detect_unclear_items(&snaps).is_empty());
    }

    #[test]
    fn focus_flag_uses_focus_wording() {
        let body = "## Later\n- [ ] write report\n## Focus today\n- [ ] Write Report\n";
        let snaps = vec![note("2024-01-02", body), note("2024-01-01", body)];
        let items = detect_unclear_items(&snaps);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].task, "Write Report");
        assert!(items[0].reason.starts_with("In \"Focus today\""));
    }

    #[test]
    fn flagged_at_most_once_across_rules() {
        let body = "## Focus today\n- [ ] Ship release\n";
        let snaps = vec![
            note("2024-01-04", body),
            note("2024-01-03", body),
            note("2024-01-02", body),
            note("2024-01-01", body),
        ];
        let items = detect_unclear_items(&snaps);
        assert_eq!(items.len(), 1);
        assert!(items[0].reason.starts_with("In \"Focus today\""));
    }

    #[test]
    fn duplicate_lines_in_one_day_count_once() {
        let body = "- [ ] Write report\n- [ ] write report\n";
        let snaps = vec![note("2024-01-02", body), note("2024-01-01", body)];
        assert!(detect_unclear_items(&snaps).is_empty());
    }

    #[test]
    fn empty_input() {
        assert!(detect_unclear_items(&[]).is_empty());
    }

    // ── merge_unclear_items tests ──

    fn unclear(task: &str) -> UnclearItem {
        UnclearItem {
            task: task.into(),
            source: "s".into(),
            reason: "r".into(),
            question: "q".into(),
        }
    }

    #[test]
    fn merge_appends_only_unmatched() {
        let supplied = vec![unclear("Write Report")];
        let detected = vec![unclear("write  report"), unclear("Plan offsite")];
        let merged = merge_unclear_items(supplied, detected);
        let tasks: Vec<&str> = merged.iter().map(|i| i.task.as_str()).collect();
        assert_eq!(tasks, vec!["Write Report", "Plan offsite"]);
    }
}
