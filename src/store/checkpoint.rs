//! Checkpoints pushed by BEGIN and consumed by ROLLBACK

use super::table::DualIndexTable;
use crate::config::CheckpointMode;
use bytes::Bytes;

/// Previous binding of a key, recorded before it was overwritten or removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoRecord {
    /// The mutated key
    pub key: Bytes,

    /// Value bound before the mutation (`None` if the key was unbound)
    pub previous: Option<Bytes>,
}

/// What a checkpoint holds to restore its table state
#[derive(Debug, Clone)]
enum Restore {
    /// Full copy of the table at BEGIN
    Snapshot(DualIndexTable),

    /// Mutations applied since BEGIN, oldest first
    Journal(Vec<UndoRecord>),
}

/// A restorable point in the command sequence
#[derive(Debug, Clone)]
pub struct Checkpoint {
    /// Mutation counter value when the checkpoint was taken
    tag: u64,

    restore: Restore,
}

impl Checkpoint {
    /// Capture the current state of `table`
    pub fn capture(table: &DualIndexTable, tag: u64, mode: CheckpointMode) -> Self {
        let restore = match mode {
            CheckpointMode::Snapshot => Restore::Snapshot(table.clone()),
            CheckpointMode::UndoLog => Restore::Journal(Vec::new()),
        };

        Checkpoint { tag, restore }
    }

    /// Mutation counter value recorded at capture
    pub fn tag(&self) -> u64 {
        self.tag
    }

    /// Number of journaled mutations (always 0 for snapshots)
    pub fn journal_len(&self) -> usize {
        match &self.restore {
            Restore::Snapshot(_) => 0,
            Restore::Journal(undo) => undo.len(),
        }
    }

    /// Record a mutation made while this checkpoint is the innermost one
    pub fn record(&mut self, key: Bytes, previous: Option<Bytes>) {
        if let Restore::Journal(undo) = &mut self.restore {
            undo.push(UndoRecord { key, previous });
        }
    }

    /// Bring `table` back to the state it had at capture
    pub fn restore_into(self, table: &mut DualIndexTable) {
        match self.restore {
            Restore::Snapshot(snapshot) => *table = snapshot,
            Restore::Journal(undo) => {
                for record in undo.into_iter().rev() {
                    match record.previous {
                        Some(value) => {
                            table.set(record.key, value);
                        }
                        None => {
                            table.unset(&record.key);
                        }
                    }
                }
            }
        }
    }

    /// Fold an inner checkpoint into this one, as if the inner BEGIN never happened
    pub fn absorb(&mut self, inner: Checkpoint) {
        if let (Restore::Journal(outer), Restore::Journal(mut nested)) =
            (&mut self.restore, inner.restore)
        {
            outer.append(&mut nested);
        }
    }
}
