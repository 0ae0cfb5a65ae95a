use super::commands::{CommandExecutor, Invocation};
use super::config::{AliasManager, Config};
use super::prompt::{Params, Prompter};
use super::scrollback::{Line, Transcript};
use super::session::Session;
use crate::process::ProcessExecutor;

/// Routes one submitted line to a built-in action (`:name args`) or to the
/// shell, and reports the outcome on the transcript. Errors never escape a
/// single submission.
///
/// Typed lines are handed to the shell unmodified and run with the full
/// privileges of the user running vish.
#[derive(Clone)]
pub struct Dispatcher {
    commands: CommandExecutor,
    process: ProcessExecutor,
    aliases: AliasManager,
}

impl Dispatcher {
    pub fn new(config: &Config) -> Self {
        let settings = config.settings();
        Self {
            commands: CommandExecutor::new(settings),
            process: ProcessExecutor::new(settings.shell.clone()).with_env(config.exports().clone()),
            aliases: config.aliases().clone(),
        }
    }

    pub fn submit(
        &self,
        session: &mut Session,
        line: &str,
        prompter: &mut dyn Prompter,
        out: &mut dyn Transcript,
    ) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        match line.strip_prefix(':') {
            Some(action) => {
                let action = action.trim_start();
                let (name, rest) = action
                    .split_once(char::is_whitespace)
                    .unwrap_or((action, ""));
                self.run_action(session, name, rest, prompter, out);
            }
            None => self.run_typed(session, line, out),
        }
    }

    /// Runs a built-in action. Actions are not recorded in the history.
    pub fn run_action(
        &self,
        session: &mut Session,
        name: &str,
        rest: &str,
        prompter: &mut dyn Prompter,
        out: &mut dyn Transcript,
    ) {
        tracing::debug!(action = name, "running action");

        let mut inv = Invocation {
            session,
            params: Params::new(rest, prompter),
            out: &mut *out,
            process: &self.process,
        };

        match self.commands.execute(name, &mut inv) {
            Ok(()) => {}
            Err(e) if e.is_cancelled() => tracing::debug!(action = name, "action cancelled"),
            Err(e) => {
                tracing::warn!(action = name, error = %e, "action failed");
                out.append(Line::error(e.to_string()));
            }
        }
    }

    /// Records `line` in the history and runs it through the shell in the
    /// working directory.
    pub fn run_typed(&self, session: &mut Session, line: &str, out: &mut dyn Transcript) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        session.history_mut().push(line);
        out.append(Line::echo(line));

        let expanded = self.aliases.expand_command(line);
        tracing::debug!(command = %expanded, "running typed command");

        match self.process.run_shell(&expanded, session.working_dir()) {
            Ok(output) => {
                out.append_block(output.visible_text());
                if !output.success() {
                    out.append(Line::error(format!(
                        "Process exited with status: {}",
                        output.status
                    )));
                }
            }
            Err(e) => {
                tracing::warn!(command = line, error = %e, "typed command failed");
                out.append(Line::error(format!("Error executing command: {}", e)));
            }
        }
    }

    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.commands.names()
    }

    pub fn alias_names(&self) -> impl Iterator<Item = &str> {
        self.aliases.names()
    }
}
