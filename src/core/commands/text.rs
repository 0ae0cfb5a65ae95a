use super::{Command, CommandError, Invocation};
use crate::core::scrollback::Line;

pub fn concatenate(first: &str, second: &str) -> String {
    let mut joined = String::with_capacity(first.len() + second.len());
    joined.push_str(first);
    joined.push_str(second);
    joined
}

#[derive(Clone, Debug, Default)]
pub struct ConcatCommand;

impl Command for ConcatCommand {
    fn execute(&self, inv: &mut Invocation<'_>) -> Result<(), CommandError> {
        let first = inv
            .params
            .word("Concatenate Strings", "Enter the first string:")?;
        let second = inv
            .params
            .text("Concatenate Strings", "Enter the second string:")?;

        inv.out.append(Line::echo("concatenate"));
        inv.out
            .append(Line::output(format!("Result: {}", concatenate(&first, &second))));
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct EchoCommand;

impl Command for EchoCommand {
    fn execute(&self, inv: &mut Invocation<'_>) -> Result<(), CommandError> {
        let message = inv.params.text("Echo Message", "Enter message:")?;

        inv.out.append(Line::echo(format!("echo {}", message)));
        inv.out.append(Line::output(message));
        Ok(())
    }
}
