use super::{Command, CommandError, Context, Invocation};
use crate::core::scrollback::Line;

/// Recursive text search through an external program, scoped to the
/// working directory.
#[derive(Clone, Debug)]
pub struct GrepCommand {
    program: String,
}

impl Default for GrepCommand {
    fn default() -> Self {
        Self::new("grep")
    }
}

impl GrepCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Command for GrepCommand {
    fn execute(&self, inv: &mut Invocation<'_>) -> Result<(), CommandError> {
        let pattern = inv.params.text("Search (grep)", "Enter search pattern:")?;
        let cwd = inv.session.working_dir();
        let scope = cwd.to_string_lossy();

        let output = inv
            .process
            .run(&self.program, &["-r", pattern.as_str(), &*scope], cwd)
            .context("executing grep")?;

        inv.out.append(Line::echo(format!("grep {}", pattern)));
        inv.out.append_block(output.visible_text());
        Ok(())
    }
}
