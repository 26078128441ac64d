//! In-memory storage module
//!
//! Provides the dual-index table and the transactional layer on top of it.
//! This module is independent of protocol and command handling (loose coupling).

mod checkpoint;
mod error;
mod table;
mod transactional;

pub use checkpoint::{Checkpoint, UndoRecord};
pub use error::{Result, StoreError};
pub use table::{DualIndexTable, TableStats};
pub use transactional::{Lifecycle, StoreStats, TransactionalStore};
