//! Transaction commands (BEGIN, ROLLBACK, COMMIT)

use super::{write_reply, Command, CommandContext};
use crate::protocol::Reply;
use bytes::Bytes;

/// BEGIN command - Open a nested transaction
///
/// Syntax: BEGIN
pub struct BeginCommand;

impl Command for BeginCommand {
    fn execute(&self, ctx: &mut CommandContext, _args: &[Bytes]) -> Reply {
        ctx.store.begin();
        Reply::Silent
    }

    fn name(&self) -> &'static str {
        "BEGIN"
    }

    fn max_args(&self) -> Option<usize> {
        Some(0)
    }
}

/// ROLLBACK command - Undo the innermost transaction
///
/// Syntax: ROLLBACK
pub struct RollbackCommand;

impl Command for RollbackCommand {
    fn execute(&self, ctx: &mut CommandContext, _args: &[Bytes]) -> Reply {
        write_reply(ctx.store.rollback())
    }

    fn name(&self) -> &'static str {
        "ROLLBACK"
    }

    fn max_args(&self) -> Option<usize> {
        Some(0)
    }
}

/// COMMIT command - Commit according to the store's commit policy
///
/// Syntax: COMMIT
pub struct CommitCommand;

impl Command for CommitCommand {
    fn execute(&self, ctx: &mut CommandContext, _args: &[Bytes]) -> Reply {
        write_reply(ctx.store.commit())
    }

    fn name(&self) -> &'static str {
        "COMMIT"
    }

    fn max_args(&self) -> Option<usize> {
        Some(0)
    }
}
