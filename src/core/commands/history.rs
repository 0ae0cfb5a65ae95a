use super::{Command, CommandError, Invocation};
use crate::core::scrollback::Line;

#[derive(Clone, Debug, Default)]
pub struct HistoryCommand;

impl Command for HistoryCommand {
    fn execute(&self, inv: &mut Invocation<'_>) -> Result<(), CommandError> {
        inv.out.append(Line::echo("history"));
        for entry in inv.session.history().numbered() {
            inv.out.append(Line::output(entry));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Harness;
    use super::*;

    #[test]
    fn test_history_numbered_listing() {
        let mut h = Harness::new();
        h.session.history_mut().push("echo a");
        h.session.history_mut().push("echo b");

        h.run(&HistoryCommand, "").unwrap();
        assert_eq!(h.texts(), vec!["$ history", "1: echo a", "2: echo b"]);
    }

    #[test]
    fn test_empty_history() {
        let mut h = Harness::new();
        h.run(&HistoryCommand, "").unwrap();
        assert_eq!(h.texts(), vec!["$ history"]);
    }
}
