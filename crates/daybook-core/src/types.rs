use serde::{Deserialize, Serialize};

use crate::extract::parse_tasks;

// ── Daily notes ──

/// One checkbox line extracted from a markdown note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub text: String,
    /// Text of the last heading above the line; empty when none was seen.
    #[serde(default)]
    pub section: String,
    pub complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jira_id: Option<String>,
}

/// A bullet collected from inside an "action items" style section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jira_id: Option<String>,
}

/// A single daily note as read from the document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAgendaSnapshot {
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub content: String,
    pub tasks: Vec<Task>,
}

impl DailyAgendaSnapshot {
    /// Build a snapshot, extracting tasks from `content`.
    pub fn from_content(date: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        let tasks = parse_tasks(&content);
        Self {
            date: date.into(),
            content,
            tasks,
        }
    }

    /// Tasks that are still open.
    pub fn incomplete_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.complete)
    }
}

/// A task surfaced for clarification because it kept carrying over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnclearItem {
    pub task: String,
    pub source: String,
    pub reason: String,
    pub question: String,
}

// ── Draft agenda ──

/// Three-bucket agenda of open work. Buckets never share an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftAgenda {
    #[serde(default)]
    pub focus_today: Vec<String>,
    #[serde(default)]
    pub quick_wins: Vec<String>,
    #[serde(default)]
    pub later: Vec<String>,
}

impl DraftAgenda {
    pub fn is_empty(&self) -> bool {
        self.focus_today.is_empty() && self.quick_wins.is_empty() && self.later.is_empty()
    }
}

/// What the user decided to do with an unclear task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionKind {
    Done,
    Drop,
    FocusToday,
    QuickWin,
    Later,
}

/// A user's answer for one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub task: String,
    pub resolution: ResolutionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

// ── Issue tracking ──

/// A pull request as normalized by the code-host adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jira_id: Option<String>,
    /// `None` while HIL checks are still pending.
    #[serde(default)]
    pub hil_checks_passing: Option<bool>,
    #[serde(default)]
    pub has_approval: bool,
    #[serde(default)]
    pub review_state: String,
    #[serde(default)]
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

/// A tracker ticket as normalized by the tracker adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JiraTicket {
    pub key: String,
    pub summary: String,
    pub status: String,
    pub url: String,
    #[serde(default)]
    pub has_linked_pr: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_pr_number: Option<u64>,
}

/// Ticket status values the reconciler reacts to.
pub mod ticket_status {
    pub const IN_PROGRESS: &str = "In Progress";
    pub const IN_REVIEW: &str = "In Review";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    NeedsApproval,
    StatusMismatch,
    PrNoTicket,
    TicketNoPr,
}

impl WarningKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningKind::NeedsApproval => "needs_approval",
            WarningKind::StatusMismatch => "status_mismatch",
            WarningKind::PrNoTicket => "pr_no_ticket",
            WarningKind::TicketNoPr => "ticket_no_pr",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationWarning {
    #[serde(rename = "type")]
    pub kind: WarningKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jira_key: Option<String>,
}

/// Derived view over one PR list and one ticket list. Holds no state
/// between calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    pub matched_prs: Vec<PullRequest>,
    pub matched_tickets: Vec<JiraTicket>,
    pub unmatched_prs: Vec<PullRequest>,
    pub unmatched_tickets: Vec<JiraTicket>,
    pub warnings: Vec<ReconciliationWarning>,
}

impl ReconciliationResult {
    pub fn warnings_of(&self, kind: WarningKind) -> impl Iterator<Item = &ReconciliationWarning> {
        self.warnings.iter().filter(move |w| w.kind == kind)
    }
}
