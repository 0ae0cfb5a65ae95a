use super::{Command, CommandError, Invocation, ACTIONS};
use crate::core::scrollback::Line;

#[derive(Clone, Debug, Default)]
pub struct HelpCommand;

impl Command for HelpCommand {
    fn execute(&self, inv: &mut Invocation<'_>) -> Result<(), CommandError> {
        inv.out.append(Line::echo("help"));
        inv.out.append(Line::output("Commands:"));
        for (name, summary) in ACTIONS {
            inv.out
                .append(Line::output(format!("  :{:<10} {}", name, summary)));
        }
        inv.out.append(Line::output(
            "Anything else is run by the shell in the current directory.",
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Harness;
    use super::*;

    #[test]
    fn test_help_lists_all_actions() {
        let mut h = Harness::new();
        h.run(&HelpCommand, "").unwrap();
        let texts = h.texts();
        assert_eq!(texts.len(), ACTIONS.len() + 3);
        assert_eq!(texts[2], "  :ls         List Files");
    }
}
