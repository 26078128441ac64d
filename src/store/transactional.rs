//! Transactional store
//!
//! Gates every write behind the session lifecycle and keeps a stack of
//! checkpoints over the dual-index table. Single caller, no internal locking.

use super::checkpoint::Checkpoint;
use super::error::{Result, StoreError};
use super::table::DualIndexTable;
use crate::config::{CheckpointMode, CommitPolicy, Config};
use bytes::Bytes;
use tracing::debug;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Writes and rollbacks are accepted
    Open,
    /// COMMIT was issued under the sealing policy; terminal
    Sealed,
}

/// Key/value store with nested transactions
pub struct TransactionalStore {
    /// Live table
    table: DualIndexTable,

    /// Open checkpoints, innermost last
    checkpoints: Vec<Checkpoint>,

    /// Mutating commands applied so far, rewound on rollback
    mutations: u64,

    lifecycle: Lifecycle,

    checkpoint_mode: CheckpointMode,

    commit_policy: CommitPolicy,
}

impl TransactionalStore {
    /// Create an empty store with default configuration
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Create an empty store from configuration
    pub fn with_config(config: &Config) -> Self {
        TransactionalStore {
            table: DualIndexTable::with_capacity(config.initial_capacity),
            checkpoints: Vec::new(),
            mutations: 0,
            lifecycle: Lifecycle::Open,
            checkpoint_mode: config.checkpoint_mode,
            commit_policy: config.commit_policy,
        }
    }

    /// Open a (possibly nested) transaction
    ///
    /// Ignored once the store is sealed.
    pub fn begin(&mut self) {
        if self.lifecycle == Lifecycle::Sealed {
            debug!("BEGIN ignored on sealed store");
            return;
        }

        let checkpoint = Checkpoint::capture(&self.table, self.mutations, self.checkpoint_mode);
        self.checkpoints.push(checkpoint);
        debug!(depth = self.depth(), tag = self.mutations, "checkpoint pushed");
    }

    /// Bind `key` to `value`
    pub fn set(&mut self, key: impl Into<Bytes>, value: impl Into<Bytes>) -> Result<()> {
        self.ensure_open()?;

        let key = key.into();
        let previous = self.table.set(key.clone(), value);
        self.journal(key, previous);
        self.mutations += 1;
        Ok(())
    }

    /// Remove the binding of `key`; a missing key is not an error
    pub fn unset(&mut self, key: impl Into<Bytes>) -> Result<()> {
        self.ensure_open()?;

        let key = key.into();
        if let Some(previous) = self.table.unset(&key) {
            self.journal(key, Some(previous));
            self.mutations += 1;
        }
        Ok(())
    }

    /// Get the value bound to `key`
    pub fn get(&self, key: &[u8]) -> Option<&Bytes> {
        self.table.get(key)
    }

    /// Number of keys bound to `value`
    pub fn count_equal_to(&self, value: &[u8]) -> usize {
        self.table.count_equal_to(value)
    }

    /// Commit according to the configured policy
    ///
    /// Under `Seal` the store becomes permanently read-only and the checkpoint
    /// stack is left as is. Under `Collapse` the innermost checkpoint is merged
    /// into its parent.
    pub fn commit(&mut self) -> Result<()> {
        match self.commit_policy {
            CommitPolicy::Seal => {
                self.lifecycle = Lifecycle::Sealed;
                debug!(depth = self.depth(), "store sealed");
                Ok(())
            }
            CommitPolicy::Collapse => {
                self.ensure_open()?;
                let inner = self
                    .checkpoints
                    .pop()
                    .ok_or(StoreError::NoActiveTransaction)?;
                if let Some(parent) = self.checkpoints.last_mut() {
                    parent.absorb(inner);
                }
                debug!(depth = self.depth(), "innermost transaction committed");
                Ok(())
            }
        }
    }

    /// Undo everything since the innermost BEGIN
    ///
    /// Fails when sealed, when no checkpoint is open, or while the mutation
    /// counter is zero. Nothing is popped on failure.
    pub fn rollback(&mut self) -> Result<()> {
        self.ensure_open()?;

        if self.mutations == 0 {
            return Err(StoreError::NoActiveTransaction);
        }

        let checkpoint = self
            .checkpoints
            .pop()
            .ok_or(StoreError::NoActiveTransaction)?;

        self.mutations = checkpoint.tag();
        checkpoint.restore_into(&mut self.table);
        debug!(depth = self.depth(), tag = self.mutations, "rolled back");
        Ok(())
    }

    /// Current transaction nesting depth
    pub fn depth(&self) -> usize {
        self.checkpoints.len()
    }

    /// Current lifecycle state
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Check if the store has been sealed by COMMIT
    pub fn is_sealed(&self) -> bool {
        self.lifecycle == Lifecycle::Sealed
    }

    /// Get statistics about the store
    pub fn stats(&self) -> StoreStats {
        let table = self.table.stats();
        StoreStats {
            keys: table.keys,
            distinct_values: table.distinct_values,
            depth: self.depth(),
            lifecycle: self.lifecycle,
        }
    }

    fn ensure_open(&self) -> Result<()> {
        match self.lifecycle {
            Lifecycle::Open => Ok(()),
            Lifecycle::Sealed => Err(StoreError::NoActiveTransaction),
        }
    }

    fn journal(&mut self, key: Bytes, previous: Option<Bytes>) {
        if let Some(checkpoint) = self.checkpoints.last_mut() {
            checkpoint.record(key, previous);
        }
    }
}

impl Default for TransactionalStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about the transactional store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub keys: usize,
    pub distinct_values: usize,
    pub depth: usize,
    pub lifecycle: Lifecycle,
}
