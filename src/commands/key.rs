//! Key commands (UNSET)

use super::{write_reply, Command, CommandContext};
use crate::protocol::Reply;
use bytes::Bytes;

/// UNSET command - Remove the binding of a key
///
/// Syntax: UNSET key
pub struct UnsetCommand;

impl Command for UnsetCommand {
    fn execute(&self, ctx: &mut CommandContext, args: &[Bytes]) -> Reply {
        // Arity is already checked by the dispatcher
        let [key] = args else {
            return Reply::illegal();
        };

        write_reply(ctx.store.unset(key.clone()))
    }

    fn name(&self) -> &'static str {
        "UNSET"
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset() {
        let mut ctx = CommandContext::new();
        ctx.store.set("a", "10").unwrap();
        ctx.store.set("b", "10").unwrap();

        let args = vec![Bytes::from("a")];
        assert_eq!(UnsetCommand.execute(&mut ctx, &args), Reply::Silent);

        assert_eq!(ctx.store.get(b"a"), None);
        assert_eq!(ctx.store.count_equal_to(b"10"), 1);
    }

    #[test]
    fn test_unset_missing() {
        let mut ctx = CommandContext::new();

        let args = vec![Bytes::from("missing")];
        assert_eq!(UnsetCommand.execute(&mut ctx, &args), Reply::Silent);
    }

    #[test]
    fn test_unset_after_commit() {
        let mut ctx = CommandContext::new();
        ctx.store.set("a", "10").unwrap();
        ctx.store.commit().unwrap();

        let args = vec![Bytes::from("a")];
        assert_eq!(UnsetCommand.execute(&mut ctx, &args), Reply::no_transaction());
        assert!(ctx.store.get(b"a").is_some());
    }
}
