use std::path::Path;

use anyhow::Context;
use clap::Subcommand;
use daybook_agenda::{merge_with_resolutions, render};
use daybook_core::Resolution;
use daybook_store::drafts::{load_draft, save_draft};
use daybook_store::DaybookPaths;

// ── CLI Schema ──

#[derive(Subcommand)]
pub enum DraftCmd {
    /// Print the stored draft agenda
    Show,
    /// Apply a JSON list of resolutions to the stored draft
    Resolve {
        /// JSON array of {task, resolution, context?}
        file: std::path::PathBuf,
        /// Print the merged draft without saving it
        #[arg(long)]
        dry_run: bool,
    },
}

// ── Dispatch ──

pub fn run(cmd: DraftCmd, repo_root: &Path) -> anyhow::Result<()> {
    match cmd {
        DraftCmd::Show => show(repo_root),
        DraftCmd::Resolve { file, dry_run } => resolve(repo_root, &file, dry_run),
    }
}

// ── Command Implementations ──

/// `daybook draft show`
fn show(repo_root: &Path) -> anyhow::Result<()> {
    let paths = DaybookPaths::locate(repo_root)?;
    print!("{}", render(&load_draft(&paths)?));
    Ok(())
}

/// `daybook draft resolve <file>`
fn resolve(repo_root: &Path, file: &Path, dry_run: bool) -> anyhow::Result<()> {
    let paths = DaybookPaths::locate(repo_root)?;
    let content =
        std::fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let resolutions: Vec<Resolution> = serde_json::from_str(&content)
        .with_context(|| format!("parsing resolutions in {}", file.display()))?;

    let merged = merge_with_resolutions(&load_draft(&paths)?, &resolutions);
    if !dry_run {
        save_draft(&paths, &merged)?;
        tracing::info!(count = resolutions.len(), "applied resolutions to draft");
    }
    print!("{}", render(&merged));
    Ok(())
}
