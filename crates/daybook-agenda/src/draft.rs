use daybook_core::extract::{checkbox_line, heading_text};
use daybook_core::{DraftAgenda, Resolution, ResolutionKind};

pub const FOCUS_TODAY_HEADING: &str = "Focus today";
pub const QUICK_WINS_HEADING: &str = "Quick wins";
pub const LATER_HEADING: &str = "Later";

/// Separator between hand-edited agenda content and appended status tables.
pub const AGENDA_END_MARKER: &str = "---";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    FocusToday,
    QuickWins,
    Later,
}

impl Bucket {
    const ALL: [Bucket; 3] = [Bucket::FocusToday, Bucket::QuickWins, Bucket::Later];

    fn heading(self) -> &'static str {
        match self {
            Bucket::FocusToday => FOCUS_TODAY_HEADING,
            Bucket::QuickWins => QUICK_WINS_HEADING,
            Bucket::Later => LATER_HEADING,
        }
    }

    /// Exact, case-sensitive heading match.
    fn from_heading(title: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.heading() == title)
    }

    fn for_resolution(kind: ResolutionKind) -> Option<Self> {
        match kind {
            ResolutionKind::FocusToday => Some(Bucket::FocusToday),
            ResolutionKind::QuickWin => Some(Bucket::QuickWins),
            ResolutionKind::Later => Some(Bucket::Later),
            ResolutionKind::Done | ResolutionKind::Drop => None,
        }
    }

    fn entries(self, draft: &DraftAgenda) -> &Vec<String> {
        match self {
            Bucket::FocusToday => &draft.focus_today,
            Bucket::QuickWins => &draft.quick_wins,
            Bucket::Later => &draft.later,
        }
    }

    fn entries_mut(self, draft: &mut DraftAgenda) -> &mut Vec<String> {
        match self {
            Bucket::FocusToday => &mut draft.focus_today,
            Bucket::QuickWins => &mut draft.quick_wins,
            Bucket::Later => &mut draft.later,
        }
    }
}

// ── Render ──

/// Render the draft as markdown with all three headings, in fixed order.
///
/// Every entry becomes an open checkbox; empty buckets keep their heading.
pub fn render(draft: &DraftAgenda) -> String {
    Bucket::ALL
        .into_iter()
        .map(|bucket| {
            let mut section = format!("## {}\n", bucket.heading());
            for entry in bucket.entries(draft) {
                section.push_str(&format!("- [ ] {entry}\n"));
            }
            section
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Parse ──

/// Read a draft back from markdown.
///
/// Only unchecked items under the three canonical headings are kept. Any
/// other heading, or the first `---` line, ends the scan; this is what keeps
/// appended status tables out of the draft.
pub fn parse(markdown: &str) -> DraftAgenda {
    let mut draft = DraftAgenda::default();
    let mut current: Option<Bucket> = None;

    for line in markdown.lines() {
        if line.trim() == AGENDA_END_MARKER {
            break;
        }
        if let Some(title) = heading_text(line) {
            match Bucket::from_heading(title) {
                Some(bucket) => current = Some(bucket),
                None => break,
            }
            continue;
        }
        let Some(bucket) = current else {
            continue;
        };
        if let Some((false, text)) = checkbox_line(line) {
            bucket.entries_mut(&mut draft).push(text.to_string());
        }
    }

    draft
}

// ── Merge ──

/// Apply user resolutions to a draft.
///
/// Each resolution first removes, from every bucket, any entry whose
/// lowercased text contains the lowercased task text. This is substring
/// containment: resolving "Fix bug" also removes "Fix bug in parser".
/// `done` and `drop` stop there; other resolutions append the task (with
/// `" — context"` when given) to the named bucket.
pub fn merge_with_resolutions(draft: &DraftAgenda, resolutions: &[Resolution]) -> DraftAgenda {
    let mut merged = draft.clone();

    for resolution in resolutions {
        let needle = resolution.task.to_lowercase();
        for bucket in Bucket::ALL {
            bucket
                .entries_mut(&mut merged)
                .retain(|entry| !entry.to_lowercase().contains(&needle));
        }

        let Some(target) = Bucket::for_resolution(resolution.resolution) else {
            continue;
        };
        let text = match resolution.context.as_deref().map(str::trim) {
            Some(context) if !context.is_empty() => format!("{} — {context}", resolution.task),
            _ => resolution.task.clone(),
        };
        target.entries_mut(&mut merged).push(text);
    }

    merged
}
