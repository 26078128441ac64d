//! Dual-index table
//!
//! Keeps a forward index (key -> value) and its inverse (value -> keys)
//! consistent on every write.

use bytes::Bytes;
use siphasher::sip::SipHasher13;
use std::collections::{HashMap, HashSet};
use std::hash::BuildHasherDefault;

type SipBuildHasher = BuildHasherDefault<SipHasher13>;

/// Forward index: one entry per live key
type ForwardIndex = HashMap<Bytes, Bytes, SipBuildHasher>;

/// Keys currently bound to a single value
type KeySet = HashSet<Bytes, SipBuildHasher>;

/// Reverse index: never holds an empty bucket
type ReverseIndex = HashMap<Bytes, KeySet, SipBuildHasher>;

/// Key/value table indexed in both directions
///
/// Cloning produces a fully independent copy; nothing is shared with the
/// source table except immutable `Bytes` payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DualIndexTable {
    forward: ForwardIndex,
    reverse: ReverseIndex,
}

impl DualIndexTable {
    /// Create an empty table with default capacity
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// Create an empty table with the given forward-index capacity
    pub fn with_capacity(capacity: usize) -> Self {
        DualIndexTable {
            forward: HashMap::with_capacity_and_hasher(capacity, SipBuildHasher::default()),
            reverse: HashMap::with_hasher(SipBuildHasher::default()),
        }
    }

    /// Bind `key` to `value`, returning the previous binding
    pub fn set(&mut self, key: impl Into<Bytes>, value: impl Into<Bytes>) -> Option<Bytes> {
        let key = key.into();
        let value = value.into();

        let previous = self.forward.insert(key.clone(), value.clone());

        if let Some(old) = &previous {
            if *old == value {
                return previous;
            }
            self.detach(old, &key);
        }

        self.reverse.entry(value).or_default().insert(key);
        previous
    }

    /// Remove the binding of `key`, returning the value it had
    ///
    /// Unsetting an unbound key is a no-op.
    pub fn unset(&mut self, key: &[u8]) -> Option<Bytes> {
        let old = self.forward.remove(key)?;
        self.detach(&old, key);
        Some(old)
    }

    /// Get the value bound to `key`
    pub fn get(&self, key: &[u8]) -> Option<&Bytes> {
        self.forward.get(key)
    }

    /// Number of keys currently bound to `value`
    pub fn count_equal_to(&self, value: &[u8]) -> usize {
        self.reverse.get(value).map_or(0, |keys| keys.len())
    }

    /// Number of live keys
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Check if the table holds no keys
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Number of distinct values currently bound
    pub fn distinct_values(&self) -> usize {
        self.reverse.len()
    }

    /// Get statistics about the table
    pub fn stats(&self) -> TableStats {
        TableStats {
            keys: self.len(),
            distinct_values: self.distinct_values(),
        }
    }

    /// Drop `key` from the bucket of `value`, removing the bucket once empty
    fn detach(&mut self, value: &[u8], key: &[u8]) {
        if let Some(keys) = self.reverse.get_mut(value) {
            keys.remove(key);
            if keys.is_empty() {
                self.reverse.remove(value);
            }
        }
    }

    /// Check that both indices describe the same bindings
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        let forward_ok = self.forward.iter().all(|(key, value)| {
            self.reverse
                .get(value)
                .is_some_and(|keys| keys.contains(key))
        });

        let reverse_ok = self.reverse.iter().all(|(value, keys)| {
            !keys.is_empty()
                && keys
                    .iter()
                    .all(|key| self.forward.get(key) == Some(value))
        });

        forward_ok && reverse_ok
    }
}

impl Default for DualIndexTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about a dual-index table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStats {
    pub keys: usize,
    pub distinct_values: usize,
}
