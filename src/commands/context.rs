//! Command execution context

use crate::config::Config;
use crate::store::TransactionalStore;

/// Context provided to commands during execution
///
/// Gives commands access to the store without exposing the dispatcher.
pub struct CommandContext {
    /// The transactional store
    pub store: TransactionalStore,
}

impl CommandContext {
    /// Create a new command context
    pub fn new() -> Self {
        CommandContext {
            store: TransactionalStore::new(),
        }
    }

    /// Create a context whose store follows `config`
    pub fn with_config(config: &Config) -> Self {
        CommandContext {
            store: TransactionalStore::with_config(config),
        }
    }
}

impl Default for CommandContext {
    fn default() -> Self {
        Self::new()
    }
}
