//! Command dispatcher
//!
//! Routes incoming commands to the appropriate handler.
//! This module provides loose coupling between the session loop and command implementations.

use crate::commands::{CommandContext, CommandRegistry};
use crate::config::Config;
use crate::protocol::{CommandLine, LineParser, ProtocolError, Reply};
use tracing::{debug, warn};

/// Token that ends a session
pub const END: &str = "END";

/// What the session should do with a dispatched line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The command ran; render its reply
    Reply(Reply),

    /// The line named no known command (blank lines included)
    Unknown(ProtocolError),

    /// The END terminator was read
    End,
}

/// Command dispatcher
///
/// Receives parsed command lines, validates them, and routes to appropriate handlers
pub struct Dispatcher {
    /// Command registry
    registry: CommandRegistry,

    /// Command execution context
    context: CommandContext,
}

impl Dispatcher {
    /// Create a new dispatcher
    pub fn new() -> Self {
        Dispatcher {
            registry: CommandRegistry::new(),
            context: CommandContext::new(),
        }
    }

    /// Create a dispatcher whose store follows `config`
    pub fn with_config(config: &Config) -> Self {
        Dispatcher {
            registry: CommandRegistry::new(),
            context: CommandContext::with_config(config),
        }
    }

    /// Parse and dispatch a raw input line
    pub fn dispatch_line(&mut self, line: impl AsRef<[u8]>) -> Dispatch {
        match LineParser::parse(line) {
            Ok(command) => self.dispatch(command),
            Err(e) => {
                debug!("Unparseable line: {}", e);
                Dispatch::Unknown(e)
            }
        }
    }

    /// Dispatch a command
    ///
    /// Looks up the command name, checks the argument count, then routes
    /// to the handler. Malformed commands never reach the store.
    pub fn dispatch(&mut self, command: CommandLine) -> Dispatch {
        let name = command.name.as_str();
        debug!("Dispatching command: {}", name);

        let handler = match self.registry.get(name) {
            Some(cmd) => cmd,
            None if name == END => return Dispatch::End,
            None => {
                warn!("Unknown command: {}", name);
                return Dispatch::Unknown(ProtocolError::UnknownCommand(command.name));
            }
        };

        // Validate argument count
        let got = command.args.len();
        let too_many = handler.max_args().is_some_and(|max| got > max);
        if got < handler.min_args() || too_many {
            let err = ProtocolError::WrongArity {
                command: handler.name(),
                got,
            };
            debug!("{}", err);
            return Dispatch::Reply(Reply::illegal());
        }

        // Execute the command
        let reply = handler.execute(&mut self.context, &command.args);
        debug!("Reply: {:?}", reply);
        Dispatch::Reply(reply)
    }

    /// Get reference to the context (for testing/inspection)
    pub fn context(&self) -> &CommandContext {
        &self.context
    }

    /// Get mutable reference to the context (for testing/inspection)
    pub fn context_mut(&mut self) -> &mut CommandContext {
        &mut self.context
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
