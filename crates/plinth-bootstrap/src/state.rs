//! Durable node state persistence.

use crate::errors::Result;
use crate::types::NodeState;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads and saves the node state document at a configured path.
///
/// Saves go to a temporary sibling file first and are renamed into place,
/// so a crash mid-write never leaves a torn document behind.
pub struct NodeStateStore {
    path: PathBuf,
}

impl NodeStateStore {
    /// Create a store for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the state document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the state. A missing file is the empty state, not an error.
    pub fn load(&self) -> Result<NodeState> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no node state file, starting empty");
            return Ok(NodeState::default());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Persist the state atomically.
    pub fn save(&self, state: &NodeState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(state)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
