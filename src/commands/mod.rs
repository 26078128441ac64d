//! Command execution module
//!
//! Provides a unified interface for all commands through the Command trait.
//! Each command family is implemented in a separate file for high cohesion.

mod context;
mod registry;

// Command implementations
mod string;
mod key;
mod count;
mod transaction;

pub use context::CommandContext;
pub use registry::CommandRegistry;

use crate::protocol::Reply;
use crate::store::{self, StoreError};
use bytes::Bytes;

/// Command execution trait
///
/// All commands implement this trait with a single execute method.
/// This provides loose coupling between command implementations and the dispatcher.
pub trait Command: Send + Sync {
    /// Execute the command with the given context and arguments
    ///
    /// Arguments:
    /// - ctx: mutable reference to the command context (contains the store)
    /// - args: command arguments (excluding the command name itself)
    ///
    /// Returns:
    /// - Reply to render on the output stream
    fn execute(&self, ctx: &mut CommandContext, args: &[Bytes]) -> Reply;

    /// Get the command name, as it must be typed
    fn name(&self) -> &'static str;

    /// Get the minimum number of arguments required
    fn min_args(&self) -> usize {
        0
    }

    /// Get the maximum number of arguments (None = unlimited)
    fn max_args(&self) -> Option<usize> {
        None
    }
}

impl From<StoreError> for Reply {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NoActiveTransaction => Reply::no_transaction(),
        }
    }
}

/// Map a write outcome to its reply: silent on success
pub(crate) fn write_reply(result: store::Result<()>) -> Reply {
    match result {
        Ok(()) => Reply::Silent,
        Err(e) => e.into(),
    }
}
