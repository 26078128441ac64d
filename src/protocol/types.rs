//! Line protocol types
//!
//! Defines parsed commands, replies and protocol errors

use bytes::Bytes;
use thiserror::Error;

/// A tokenized command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// Command name, exactly as typed
    pub name: String,

    /// Remaining tokens
    pub args: Vec<Bytes>,
}

impl CommandLine {
    /// Create a command line from a name and arguments
    pub fn new(name: impl Into<String>, args: Vec<Bytes>) -> Self {
        CommandLine {
            name: name.into(),
            args,
        }
    }
}

/// Error replies, rendered verbatim on the output stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyError {
    /// Write or rollback refused: NO TRANSACTION
    NoTransaction,

    /// Unknown or malformed command: ILLEGAL COMMAND
    IllegalCommand,
}

impl ReplyError {
    /// Wire text of the error
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplyError::NoTransaction => "NO TRANSACTION",
            ReplyError::IllegalCommand => "ILLEGAL COMMAND",
        }
    }
}

/// Result of executing a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Nothing is printed
    Silent,

    /// A stored value
    Value(Bytes),

    /// GET on an unbound key: NULL
    Null,

    /// NUMEQUALTO result
    Count(usize),

    /// Error line
    Error(ReplyError),
}

impl Reply {
    /// Create a value reply
    pub fn value(b: impl Into<Bytes>) -> Self {
        Reply::Value(b.into())
    }

    /// Create a count reply
    pub fn count(n: usize) -> Self {
        Reply::Count(n)
    }

    /// ILLEGAL COMMAND reply
    pub fn illegal() -> Self {
        Reply::Error(ReplyError::IllegalCommand)
    }

    /// NO TRANSACTION reply
    pub fn no_transaction() -> Self {
        Reply::Error(ReplyError::NoTransaction)
    }

    /// Check if this reply prints nothing
    pub fn is_silent(&self) -> bool {
        matches!(self, Reply::Silent)
    }
}

/// Malformed command lines
///
/// All of these render as ILLEGAL COMMAND; the variants carry detail for logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("empty command line")]
    Empty,

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("wrong number of arguments for '{command}' command: got {got}")]
    WrongArity { command: &'static str, got: usize },
}
