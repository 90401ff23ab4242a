use std::path::Path;

use anyhow::Context;
use daybook_core::{extract_jira_id, JiraTicket, PullRequest};
use daybook_reconcile::{reconcile, render_status_table};
use serde::de::DeserializeOwned;

/// `daybook reconcile --prs <file> --tickets <file>`
pub fn execute(prs_file: &Path, tickets_file: &Path, json: bool) -> anyhow::Result<()> {
    let mut prs: Vec<PullRequest> = load_list_or_empty(prs_file, "pull requests");
    let tickets: Vec<JiraTicket> = load_list_or_empty(tickets_file, "tickets");
    fill_jira_ids(&mut prs);

    let result = reconcile(&prs, &tickets);
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_status_table(&result));
    }
    Ok(())
}

/// Adapter output that cannot be read stands in as an empty list, so one
/// failed fetch does not hide the other side.
fn load_list_or_empty<T: DeserializeOwned>(path: &Path, what: &str) -> Vec<T> {
    match load_list(path) {
        Ok(list) => list,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %format!("{e:#}"),
                "could not load {what}, using an empty list"
            );
            Vec::new()
        }
    }
}

fn load_list<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

/// Take the ticket id from the PR title, then the branch name, when the
/// adapter left it empty.
fn fill_jira_ids(prs: &mut [PullRequest]) {
    for pr in prs.iter_mut().filter(|pr| pr.jira_id.is_none()) {
        pr.jira_id = extract_jira_id(&pr.title)
            .or_else(|| pr.branch.as_deref().and_then(extract_jira_id));
    }
}
