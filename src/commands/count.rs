//! Reverse-index commands (NUMEQUALTO)

use super::{Command, CommandContext};
use crate::protocol::Reply;
use bytes::Bytes;

/// NUMEQUALTO command - Count keys bound to a value
///
/// Syntax: NUMEQUALTO value
pub struct NumEqualToCommand;

impl Command for NumEqualToCommand {
    fn execute(&self, ctx: &mut CommandContext, args: &[Bytes]) -> Reply {
        // Arity is already checked by the dispatcher
        let [value] = args else {
            return Reply::illegal();
        };

        Reply::count(ctx.store.count_equal_to(value))
    }

    fn name(&self) -> &'static str {
        "NUMEQUALTO"
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
    fn test_numequalto() {
        let mut ctx = CommandContext::new();
        ctx.store.set("a", "10").unwrap();
        ctx.store.set("b", "10").unwrap();
        ctx.store.set("c", "20").unwrap();

        let args = vec![Bytes::from("10")];
        assert_eq!(NumEqualToCommand.execute(&mut ctx, &args), Reply::count(2));
    }

    #[test]
    fn test_numequalto_unknown_value() {
        let mut ctx = CommandContext::new();

        let args = vec![Bytes::from("10")];
        assert_eq!(NumEqualToCommand.execute(&mut ctx, &args), Reply::count(0));
    }
}
