use super::{Command, CommandError, Invocation};
use crate::core::scrollback::Line;
use crate::expr;

#[derive(Clone, Debug, Default)]
pub struct IfCommand;

impl Command for IfCommand {
    fn execute(&self, inv: &mut Invocation<'_>) -> Result<(), CommandError> {
        let condition = inv.params.text(
            "Conditional Statement",
            "Enter condition (e.g., '5 > 3'):",
        )?;
        let holds = expr::evaluate(&condition)?;

        inv.out.append(Line::echo(format!("if {}", condition)));
        inv.out.append(Line::output(format!(
            "Condition is {}",
            if holds { "true" } else { "false" }
        )));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Harness;
    use super::*;

    #[test]
    fn test_condition_true_and_false() {
        let mut h = Harness::new();
        h.run(&IfCommand, "5 > 3").unwrap();
        h.run(&IfCommand, "2 + 2 == 5").unwrap();
        assert_eq!(
            h.texts(),
            vec!["$ if 5 > 3", "Condition is true", "$ if 2 + 2 == 5", "Condition is false"]
        );
    }

    #[test]
    fn test_malformed_condition() {
        let mut h = Harness::new();
        let err = h.run(&IfCommand, "5 >").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error evaluating condition: unexpected end of expression"
        );
        assert!(h.texts().is_empty());
    }
}
