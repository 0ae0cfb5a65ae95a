use super::{Command, CommandError, Invocation};
use crate::core::scrollback::Line;
use crate::tree::find_named;

#[derive(Clone, Debug, Default)]
pub struct FindCommand;

impl Command for FindCommand {
    fn execute(&self, inv: &mut Invocation<'_>) -> Result<(), CommandError> {
        let target = inv
            .params
            .text("Find Command", "Enter file/directory name to search:")?;
        let found = find_named(inv.session.working_dir(), &target);

        inv.out.append(Line::echo(format!("find {}", target)));
        if found.is_empty() {
            inv.out.append(Line::output("No match found."));
            return Ok(());
        }

        inv.out.append(Line::output("Found:"));
        for path in found {
            inv.out.append(Line::output(path.display().to_string()));
        }
        Ok(())
    }
}
