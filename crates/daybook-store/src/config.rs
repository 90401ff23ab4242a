use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::paths::DaybookPaths;
use crate::write_atomic;

pub type ConfigMap = serde_json::Map<String, serde_json::Value>;

/// Settings stored in `.daybook/config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaybookConfig {
    /// Directory holding `YYYY-MM-DD.md` daily notes, relative to the
    /// workspace root unless absolute.
    #[serde(default = "default_notes_dir")]
    pub notes_dir: String,
    /// How many days of notes (ending with the reference day) to read.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
}

fn default_notes_dir() -> String {
    "daily".to_string()
}

fn default_lookback_days() -> u32 {
    7
}

impl Default for DaybookConfig {
    fn default() -> Self {
        Self {
            notes_dir: default_notes_dir(),
            lookback_days: default_lookback_days(),
        }
    }
}

impl DaybookConfig {
    /// Load typed config. A missing file yields defaults; a malformed one is
    /// an error.
    pub fn load(paths: &DaybookPaths) -> Result<Self> {
        let map = read_config(paths)?;
        serde_json::from_value(serde_json::Value::Object(map))
            .map_err(|e| StoreError::json(&paths.config_json, e))
    }

    pub fn notes_path(&self, paths: &DaybookPaths) -> PathBuf {
        paths.root.join(&self.notes_dir)
    }
}

/// Read config from `.daybook/config.json`. Returns empty map if the file
/// doesn't exist.
pub fn read_config(paths: &DaybookPaths) -> Result<ConfigMap> {
    let path = &paths.config_json;
    if !path.exists() {
        return Ok(ConfigMap::new());
    }
    let content = std::fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    let val: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| StoreError::json(path, e))?;
    match val {
        serde_json::Value::Object(map) => Ok(map),
        _ => Ok(ConfigMap::new()),
    }
}

/// Write config to `.daybook/config.json`.
pub fn write_config(paths: &DaybookPaths, config: &ConfigMap) -> Result<()> {
    let json = serde_json::to_string_pretty(config)
        .map_err(|e| StoreError::json(&paths.config_json, e))?;
    write_atomic(&paths.config_json, json.as_bytes())
}

/// Parse a string value into an appropriate JSON value (bool/number/string).
pub fn parse_value(s: &str) -> serde_json::Value {
    match s {
        "true" => serde_json::Value::Bool(true),
        "false" => serde_json::Value::Bool(false),
        _ => {
            if let Ok(n) = s.parse::<i64>() {
                serde_json::Value::Number(n.into())
            } else if let Ok(f) = s.parse::<f64>() {
                serde_json::json!(f)
            } else {
                serde_json::Value::String(s.to_string())
            }
        }
    }
}
