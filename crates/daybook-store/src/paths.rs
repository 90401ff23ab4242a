use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};

/// Name of the workspace marker directory.
pub const DAYBOOK_DIR: &str = ".daybook";

/// All well-known paths under `.daybook/`.
#[derive(Debug, Clone)]
pub struct DaybookPaths {
    pub root: PathBuf,
    pub daybook_dir: PathBuf,
    pub config_json: PathBuf,
    pub draft_md: PathBuf,
}

impl DaybookPaths {
    /// Derive all paths from a workspace root. Pure computation, no I/O.
    pub fn discover(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let daybook_dir = root.join(DAYBOOK_DIR);
        Self {
            config_json: daybook_dir.join("config.json"),
            draft_md: daybook_dir.join("draft.md"),
            daybook_dir,
            root,
        }
    }

    /// Walk up from `start` to the nearest workspace, or fail.
    pub fn locate(start: &Path) -> Result<Self> {
        Self::find_root(start)
            .map(Self::discover)
            .ok_or(StoreError::NotInitialized)
    }

    /// Create the `.daybook/` directory. Idempotent.
    pub fn ensure_layout(&self) -> Result<()> {
        std::fs::create_dir_all(&self.daybook_dir).map_err(|e| StoreError::io(&self.daybook_dir, e))
    }

    /// Check whether `.daybook/` exists.
    pub fn is_initialized(&self) -> bool {
        self.daybook_dir.is_dir()
    }

    /// Walk up from `start` looking for a directory containing `.daybook/`.
    /// Returns `None` if not found.
    pub fn find_root(start: &Path) -> Option<PathBuf> {
        let mut cur = start.to_path_buf();
        loop {
            if cur.join(DAYBOOK_DIR).is_dir() {
                return Some(cur);
            }
            if !cur.pop() {
                return None;
            }
        }
    }
}
