//! NestKV - An in-memory key-value store with nested transactions
//!
//! NestKV is designed with strong cohesion and loose coupling principles:
//! - Each module has a single, well-defined responsibility
//! - Modules communicate through clear, minimal interfaces
//! - No circular dependencies between modules

pub mod config;
pub mod protocol;
pub mod store;
pub mod commands;
pub mod dispatch;
pub mod session;

/// Re-export commonly used types
pub use config::{CheckpointMode, CommitPolicy, Config};
pub use store::{DualIndexTable, StoreError, TransactionalStore};
pub use protocol::{Reply, ReplyError};
pub use commands::{Command, CommandContext};
pub use dispatch::{Dispatch, Dispatcher};
