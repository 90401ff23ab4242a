use std::path::Path;

use anyhow::Context;
use daybook_agenda::{detect_unclear_items, merge_unclear_items};
use daybook_core::extract::{has_action_items_section, parse_action_items, parse_tasks};
use daybook_core::{Task, UnclearItem};
use daybook_store::notes::{parse_date, read_snapshots};
use daybook_store::{DaybookConfig, DaybookPaths};

fn read_text(file: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))
}

/// `daybook tasks <file>`
pub fn tasks(file: &Path, json: bool) -> anyhow::Result<()> {
    let tasks = parse_tasks(&read_text(file)?);
    if json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }
    if tasks.is_empty() {
        println!("(no tasks)");
    }
    for task in &tasks {
        println!("{}", format_task(task));
    }
    Ok(())
}

/// `daybook actions <file>`
pub fn actions(file: &Path, json: bool) -> anyhow::Result<()> {
    let content = read_text(file)?;
    let items = parse_action_items(&content);
    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }
    if !has_action_items_section(&content) {
        println!("(no action items section)");
        return Ok(());
    }
    for item in &items {
        match &item.jira_id {
            Some(id) => println!("- {} [{id}]", item.text),
            None => println!("- {}", item.text),
        }
    }
    Ok(())
}

/// `daybook unclear`
pub fn unclear(
    repo_root: &Path,
    date: Option<&str>,
    supplied: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let paths = DaybookPaths::locate(repo_root)?;
    let config = DaybookConfig::load(&paths)?;
    let today = match date {
        Some(d) => parse_date(d)?,
        None => time::OffsetDateTime::now_utc().date(),
    };

    let snapshots = read_snapshots(&config.notes_path(&paths), today, config.lookback_days)?;
    let detected = detect_unclear_items(&snapshots);

    let items = match supplied {
        Some(file) => {
            let known: Vec<UnclearItem> = serde_json::from_str(&read_text(file)?)
                .with_context(|| format!("parsing unclear items in {}", file.display()))?;
            merge_unclear_items(known, detected)
        }
        None => detected,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }
    if items.is_empty() {
        println!("Nothing is carrying over.");
    }
    for item in &items {
        println!("- {}", item.task);
        println!("  {} ({})", item.reason, item.source);
        println!("  {}", item.question);
    }
    Ok(())
}

fn format_task(task: &Task) -> String {
    let mark = if task.complete { "x" } else { " " };
    let mut line = format!("[{mark}] {}", task.text);
    if !task.section.is_empty() {
        line.push_str(&format!("  ({})", task.section));
    }
    line
}
