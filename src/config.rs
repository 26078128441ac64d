//! Runtime configuration
//!
//! Settings are read from an optional JSON file; every field has a default,
//! so an empty object (or no file at all) yields a working configuration.

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

/// How a checkpoint remembers the state it must restore
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CheckpointMode {
    /// Journal the previous binding of every mutated key, replay backwards on rollback
    UndoLog,
    /// Keep a full copy of the table taken at BEGIN
    Snapshot,
}

impl Default for CheckpointMode {
    fn default() -> Self {
        CheckpointMode::UndoLog
    }
}

/// What COMMIT does to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CommitPolicy {
    /// COMMIT seals the whole session; later writes and rollbacks fail
    Seal,
    /// COMMIT folds the innermost transaction into its parent and leaves the session open
    Collapse,
}

impl Default for CommitPolicy {
    fn default() -> Self {
        CommitPolicy::Seal
    }
}

/// Store and session configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial capacity of the forward index
    pub initial_capacity: usize,
    /// Checkpoint strategy
    pub checkpoint_mode: CheckpointMode,
    /// Commit semantics
    pub commit_policy: CommitPolicy,
    /// Default log filter, used when RUST_LOG is not set
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            initial_capacity: 1024,
            checkpoint_mode: CheckpointMode::default(),
            commit_policy: CommitPolicy::default(),
            log_level: "error".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Load from `path` when given, otherwise fall back to defaults
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Config::default()),
        }
    }
}
