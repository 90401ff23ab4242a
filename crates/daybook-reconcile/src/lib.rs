//! Cross-reference pull requests with tracker tickets.
//!
//! PRs carry the ticket key embedded in their title or branch; the adapter
//! that produced them has already pulled it out into `jira_id`. Matching is
//! by uppercased key. Everything else is derived as warnings.

pub mod render;

use std::collections::HashMap;

use daybook_core::ticket_status::{IN_PROGRESS, IN_REVIEW};
use daybook_core::{
    JiraTicket, PullRequest, ReconciliationResult, ReconciliationWarning, WarningKind,
};

pub use render::render_status_table;

/// Match PRs to tickets and collect discrepancies between them.
///
/// Pure: the result depends only on the two input lists. When several PRs
/// reference the same ticket, all of them are matched, the ticket is listed
/// once, and the first PR supplies `linked_pr_number`.
///
/// Links are derived from `prs` alone. An incoming `has_linked_pr` or
/// `linked_pr_number` on a ticket is ignored, so a ticket that no PR in this
/// list references is unmatched.
pub fn reconcile(prs: &[PullRequest], tickets: &[JiraTicket]) -> ReconciliationResult {
    let by_key: HashMap<String, usize> = tickets
        .iter()
        .enumerate()
        .map(|(i, t)| (t.key.to_uppercase(), i))
        .collect();
    let mut linked: Vec<Option<u64>> = vec![None; tickets.len()];
    let mut result = ReconciliationResult::default();

    for pr in prs {
        let Some(jira_id) = pr.jira_id.as_deref() else {
            tracing::debug!(pr = pr.number, "PR has no ticket id");
            result.warnings.push(ReconciliationWarning {
                kind: WarningKind::PrNoTicket,
                message: format!(
                    "PR #{} \"{}\" has no Jira ID in its title",
                    pr.number, pr.title
                ),
                pr_number: Some(pr.number),
                jira_key: None,
            });
            result.unmatched_prs.push(pr.clone());
            continue;
        };

        let Some(&idx) = by_key.get(&jira_id.to_uppercase()) else {
            tracing::debug!(pr = pr.number, jira_id, "PR references an untracked ticket");
            result.warnings.push(ReconciliationWarning {
                kind: WarningKind::PrNoTicket,
                message: format!(
                    "PR #{} references {jira_id}, which is not among your tracked tickets",
                    pr.number
                ),
                pr_number: Some(pr.number),
                jira_key: Some(jira_id.to_string()),
            });
            result.unmatched_prs.push(pr.clone());
            continue;
        };

        let ticket = &tickets[idx];
        if linked[idx].is_none() {
            linked[idx] = Some(pr.number);
            result.matched_tickets.push(JiraTicket {
                has_linked_pr: true,
                linked_pr_number: Some(pr.number),
                ..ticket.clone()
            });
        }
        result.matched_prs.push(pr.clone());
        check_pair(pr, ticket, &mut result.warnings);
    }

    for (ticket, link) in tickets.iter().zip(&linked) {
        if link.is_some() {
            continue;
        }
        if ticket.status == IN_REVIEW {
            result.warnings.push(ReconciliationWarning {
                kind: WarningKind::TicketNoPr,
                message: format!(
                    "{} is \"{IN_REVIEW}\" but has no linked PR",
                    ticket.key
                ),
                pr_number: None,
                jira_key: Some(ticket.key.clone()),
            });
        }
        result.unmatched_tickets.push(ticket.clone());
    }

    result
}

/// Discrepancy checks for a matched pair. Each fires independently.
fn check_pair(pr: &PullRequest, ticket: &JiraTicket, warnings: &mut Vec<ReconciliationWarning>) {
    let mut push = |kind: WarningKind, message: String| {
        warnings.push(ReconciliationWarning {
            kind,
            message,
            pr_number: Some(pr.number),
            jira_key: Some(ticket.key.clone()),
        });
    };

    if ticket.status == IN_REVIEW && !pr.has_approval {
        push(
            WarningKind::NeedsApproval,
            format!("{} is in review but PR #{} has no approval yet", ticket.key, pr.number),
        );
    }
    if pr.has_approval && ticket.status == IN_PROGRESS {
        push(
            WarningKind::StatusMismatch,
            format!(
                "PR #{} is approved but {} is still \"{IN_PROGRESS}\"; consider moving it to \"{IN_REVIEW}\"",
                pr.number, ticket.key
            ),
        );
    }
    if pr.hil_checks_passing == Some(false) {
        push(
            WarningKind::StatusMismatch,
            format!("PR #{} ({}) has failing HIL checks", pr.number, ticket.key),
        );
    }
}
