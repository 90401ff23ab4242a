use std::path::Path;

use daybook_store::config::{read_config, write_config};
use daybook_store::{DaybookConfig, DaybookPaths};

/// `daybook init`
pub fn execute(repo_root: &Path) -> anyhow::Result<()> {
    let paths = DaybookPaths::discover(repo_root);
    if paths.is_initialized() {
        println!("Workspace already initialized at {}", paths.daybook_dir.display());
        return Ok(());
    }
    paths.ensure_layout()?;

    let defaults = DaybookConfig::default();
    if read_config(&paths)?.is_empty() {
        let serde_json::Value::Object(map) = serde_json::to_value(&defaults)? else {
            anyhow::bail!("default config did not serialize to an object");
        };
        write_config(&paths, &map)?;
    }

    let notes = defaults.notes_path(&paths);
    std::fs::create_dir_all(&notes)?;
    tracing::info!(root = %paths.root.display(), "initialized workspace");

    println!("Initialized {}", paths.daybook_dir.display());
    println!("Daily notes go in {}/YYYY-MM-DD.md", notes.display());
    Ok(())
}
