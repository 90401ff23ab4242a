mod cmd_config;
mod cmd_draft;
mod cmd_init;
mod cmd_notes;
mod cmd_reconcile;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "daybook",
    version,
    about = "Tasks, carry-overs, and PR/ticket status from your daily notes"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Initialize a new .daybook/ workspace
    Init,
    /// List checkbox tasks in a markdown file
    Tasks {
        /// Markdown file to scan
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List items under "Action items" / "Next steps" style sections
    Actions {
        /// Markdown file to scan
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Flag tasks that keep carrying over between daily notes
    Unclear {
        /// Reference day (YYYY-MM-DD, defaults to today, UTC)
        #[arg(long)]
        date: Option<String>,
        /// JSON file of already-known unclear items; detected items are appended
        #[arg(long)]
        supplied: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Match pull requests to tickets and report discrepancies
    Reconcile {
        /// JSON array of pull requests
        #[arg(long)]
        prs: PathBuf,
        /// JSON array of tickets
        #[arg(long)]
        tickets: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Draft agenda operations (show, resolve)
    Draft {
        #[command(subcommand)]
        cmd: cmd_draft::DraftCmd,
    },
    /// Workspace configuration (set, get, list)
    Config {
        #[command(subcommand)]
        cmd: cmd_config::ConfigCmd,
    },
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let repo_root = std::env::current_dir()?;

    match cli.cmd {
        Command::Init => cmd_init::execute(&repo_root),
        Command::Tasks { file, json } => cmd_notes::tasks(&file, json),
        Command::Actions { file, json } => cmd_notes::actions(&file, json),
        Command::Unclear {
            date,
            supplied,
            json,
        } => cmd_notes::unclear(&repo_root, date.as_deref(), supplied.as_deref(), json),
        Command::Reconcile { prs, tickets, json } => cmd_reconcile::execute(&prs, &tickets, json),
        Command::Draft { cmd } => cmd_draft::run(cmd, &repo_root),
        Command::Config { cmd } => cmd_config::run(cmd, &repo_root),
    }
}
