use daybook_core::{JiraTicket, PullRequest, ReconciliationResult};

/// Heading of the status block appended below an agenda.
pub const STATUS_HEADING: &str = "PR / Ticket status";

/// Render a reconciliation result as the markdown block appended below the
/// agenda. Starts with a `---` rule so agenda parsing never reads into it.
pub fn render_status_table(result: &ReconciliationResult) -> String {
    let mut out = format!("---\n\n## {STATUS_HEADING}\n\n");

    if result.matched_prs.is_empty()
        && result.unmatched_prs.is_empty()
        && result.unmatched_tickets.is_empty()
    {
        out.push_str("No open PRs or tracked tickets.\n");
        return out;
    }

    if !result.matched_prs.is_empty() {
        out.push_str("| Ticket | Status | PR | Approval | HIL checks |\n");
        out.push_str("|---|---|---|---|---|\n");
        for pr in &result.matched_prs {
            let ticket = pr
                .jira_id
                .as_deref()
                .and_then(|id| find_ticket(&result.matched_tickets, id));
            let (ticket_cell, status_cell) = match ticket {
                Some(t) => (link(&t.key, &t.url), cell(&t.status)),
                None => ("?".to_string(), String::new()),
            };
            out.push_str(&format!(
                "| {ticket_cell} | {status_cell} | {} | {} | {} |\n",
                link(&format!("#{}", pr.number), &pr.url),
                if pr.has_approval { "approved" } else { "pending" },
                checks_label(pr),
            ));
        }
        out.push('\n');
    }

    if !result.unmatched_prs.is_empty() {
        out.push_str("### PRs without a tracked ticket\n");
        for pr in &result.unmatched_prs {
            out.push_str(&format!(
                "- {} {}\n",
                link(&format!("#{}", pr.number), &pr.url),
                pr.title
            ));
        }
        out.push('\n');
    }

    if !result.unmatched_tickets.is_empty() {
        out.push_str("### Tickets without a PR\n");
        for t in &result.unmatched_tickets {
            out.push_str(&format!("- {} {} ({})\n", link(&t.key, &t.url), t.summary, t.status));
        }
        out.push('\n');
    }

    if !result.warnings.is_empty() {
        out.push_str("### Warnings\n");
        for w in &result.warnings {
            out.push_str(&format!("- `{}` {}\n", w.kind.as_str(), w.message));
        }
    }

    out
}

fn find_ticket<'a>(tickets: &'a [JiraTicket], key: &str) -> Option<&'a JiraTicket> {
    tickets.iter().find(|t| t.key.eq_ignore_ascii_case(key))
}

fn checks_label(pr: &PullRequest) -> &'static str {
    match pr.hil_checks_passing {
        Some(true) => "passing",
        Some(false) => "failing",
        None => "pending",
    }
}

fn link(label: &str, url: &str) -> String {
    if url.is_empty() {
        cell(label)
    } else {
        format!("[{}]({url})", cell(label))
    }
}

/// Escape pipes so free text cannot break the table.
fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}
