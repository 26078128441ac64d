//! Line protocol implementation
//!
//! This module handles tokenizing command lines and rendering replies.
//! It is completely independent from command execution (loose coupling).

mod line;
mod types;

pub use line::{LineEncoder, LineParser};
pub use types::{CommandLine, ProtocolError, Reply, ReplyError};
