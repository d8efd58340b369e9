//! Project configuration
//!
//! Tracker settings live in `.trackd/config.json` at the project root;
//! discovery walks from a start directory through its ancestors. The
//! known-teams update is a whole-state operation: read the entire file,
//! mutate in memory, write the entire file back. A failure before the
//! write leaves prior state untouched; a failure during the write is
//! fatal and surfaced to the caller, never retried.

use serde_json::{json, Value};
use std::path::{Path, PathBuf};

pub const CONFIG_RELATIVE_PATH: &str = ".trackd/config.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no .trackd/config.json found in project hierarchy")]
    NotFound,
    #[error("failed to access config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON in config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config is not shaped as expected: {0}")]
    Malformed(&'static str),
}

/// Loaded project configuration, bound to the file it came from
pub struct ProjectConfig {
    path: PathBuf,
    root: Value,
}

impl ProjectConfig {
    /// Locate `.trackd/config.json` in `start` or any of its ancestors
    pub fn find(start: &Path) -> Result<PathBuf, ConfigError> {
        for dir in start.ancestors() {
            let candidate = dir.join(CONFIG_RELATIVE_PATH);
            if candidate.exists() {
                return Ok(candidate);
            }
        }
        Err(ConfigError::NotFound)
    }

    /// Find and load the nearest config
    pub fn load(start: &Path) -> Result<Self, ConfigError> {
        let path = Self::find(start)?;
        let content = std::fs::read_to_string(&path)?;
        let root = serde_json::from_str(&content)?;
        Ok(Self { path, root })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The tracker settings subtree (empty object when absent)
    pub fn tracker(&self) -> Value {
        self.root
            .get("tracker")
            .cloned()
            .unwrap_or_else(|| json!({}))
    }

    /// Dot-path lookup under the tracker subtree,
    /// e.g. `project.id` → `tracker.project.id`
    pub fn get(&self, key_path: &str) -> Option<Value> {
        let mut value = self.root.get("tracker")?;
        for key in key_path.split('.') {
            value = value.get(key)?;
        }
        Some(value.clone())
    }

    /// Add a team to `tracker.known_teams` if it is not already listed.
    ///
    /// Returns true when the list changed (and the file was rewritten).
    pub fn add_known_team(&mut self, name: &str) -> Result<bool, ConfigError> {
        let root = self
            .root
            .as_object_mut()
            .ok_or(ConfigError::Malformed("root is not an object"))?;
        let tracker = root
            .entry("tracker")
            .or_insert_with(|| json!({}))
            .as_object_mut()
            .ok_or(ConfigError::Malformed("'tracker' is not an object"))?;
        let teams = tracker
            .entry("known_teams")
            .or_insert_with(|| json!([]))
            .as_array_mut()
            .ok_or(ConfigError::Malformed("'known_teams' is not an array"))?;

        if teams.iter().any(|team| team.as_str() == Some(name)) {
            return Ok(false);
        }
        teams.push(json!(name));

        self.save()?;
        Ok(true)
    }

    fn save(&self) -> Result<(), ConfigError> {
        let mut content = serde_json::to_string_pretty(&self.root)?;
        content.push('\n');
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}
