use clap::Subcommand;
use daybook_store::config::{parse_value, read_config, write_config};
use daybook_store::{DaybookConfig, DaybookPaths};
use std::path::Path;

// ── CLI Schema ──

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Set a config value
    Set {
        /// Config key (e.g. lookback_days)
        key: String,
        /// Config value (true/false/number/string)
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
}

// ── Dispatch ──

pub fn run(cmd: ConfigCmd, repo_root: &Path) -> anyhow::Result<()> {
    let paths = DaybookPaths::locate(repo_root)?;
    match cmd {
        ConfigCmd::Set { key, value } => set(&paths, &key, &value),
        ConfigCmd::Get { key } => get(&paths, &key),
        ConfigCmd::List => list(&paths),
    }
}

// ── Command Implementations ──

/// `daybook config set <key> <value>`
///
/// Rejects values that would leave the typed config unloadable.
fn set(paths: &DaybookPaths, key: &str, value: &str) -> anyhow::Result<()> {
    let mut config = read_config(paths)?;
    config.insert(key.to_string(), parse_value(value));
    let typed = serde_json::Value::Object(config.clone());
    if let Err(e) = serde_json::from_value::<DaybookConfig>(typed) {
        anyhow::bail!("invalid value for {key}: {e}");
    }
    write_config(paths, &config)?;
    println!("{key} = {value}");
    Ok(())
}

/// `daybook config get <key>`
fn get(paths: &DaybookPaths, key: &str) -> anyhow::Result<()> {
    let config = read_config(paths)?;
    match config.get(key) {
        Some(val) => println!("{val}"),
        None => println!("(not set)"),
    }
    Ok(())
}

/// `daybook config list`
fn list(paths: &DaybookPaths) -> anyhow::Result<()> {
    let config = read_config(paths)?;
    if config.is_empty() {
        println!("(no config set)");
    } else {
        for (k, v) in &config {
            println!("{k} = {v}");
        }
    }
    Ok(())
}
