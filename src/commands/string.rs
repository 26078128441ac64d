//! String commands (SET, GET)

use super::{write_reply, Command, CommandContext};
use crate::protocol::Reply;
use bytes::Bytes;

/// SET command - Bind a key to a value
///
/// Syntax: SET key value
pub struct SetCommand;

impl Command for SetCommand {
    fn execute(&self, ctx: &mut CommandContext, args: &[Bytes]) -> Reply {
        // Arity is already checked by the dispatcher
        let [key, value] = args else {
            return Reply::illegal();
        };

        write_reply(ctx.store.set(key.clone(), value.clone()))
    }

    fn name(&self) -> &'static str {
        "SET"
    }

    fn min_args(&self) -> usize {
        2
    }

    fn max_args(&self) -> Option<usize> {
        Some(2)
    }
}

/// GET command - Get the value of a key
///
/// Syntax: GET key
pub struct GetCommand;

impl Command for GetCommand {
    fn execute(&self, ctx: &mut CommandContext, args: &[Bytes]) -> Reply {
        // Arity is already checked by the dispatcher
        let [key] = args else {
            return Reply::illegal();
        };

        match ctx.store.get(key) {
            Some(value) => Reply::Value(value.clone()),
            None => Reply::Null,
        }
    }

    fn name(&self) -> &'static str {
        "GET"
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
    fn test_set_get() {
        let mut ctx = CommandContext::new();

        let args = vec![Bytes::from("a"), Bytes::from("10")];
        assert_eq!(SetCommand.execute(&mut ctx, &args), Reply::Silent);

        let args = vec![Bytes::from("a")];
        assert_eq!(GetCommand.execute(&mut ctx, &args), Reply::value("10"));
    }

    #[test]
    fn test_get_nonexistent() {
        let mut ctx = CommandContext::new();

        let args = vec![Bytes::from("nonexistent")];
        assert_eq!(GetCommand.execute(&mut ctx, &args), Reply::Null);
    }

    #[test]
    fn test_set_after_commit() {
        let mut ctx = CommandContext::new();
        ctx.store.commit().unwrap();

        let args = vec![Bytes::from("b"), Bytes::from("20")];
        assert_eq!(SetCommand.execute(&mut ctx, &args), Reply::no_transaction());
        assert_eq!(ctx.store.get(b"b"), None);
    }

    #[test]
    fn test_get_after_commit() {
        let mut ctx = CommandContext::new();
        ctx.store.set("a", "10").unwrap();
        ctx.store.commit().unwrap();

        let args = vec![Bytes::from("a")];
        assert_eq!(GetCommand.execute(&mut ctx, &args), Reply::value("10"));
    }

    #[test]
    fn test_set_wrong_arity() {
        let mut ctx = CommandContext::new();

        let args = vec![Bytes::from("a")];
        assert_eq!(SetCommand.execute(&mut ctx, &args), Reply::illegal());
        assert!(ctx.store.stats().keys == 0);
    }
}
