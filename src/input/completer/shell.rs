use std::{borrow::Cow, path::PathBuf};

use super::{action::ActionCompleter, command::CommandCompleter, path::PathCompleter};
use crate::highlight::SyntaxHighlighter;

use rustyline::{
    completion::{Completer, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

/// Line editor helper: completion plus input highlighting.
#[derive(Clone)]
pub struct ShellCompleter {
    action_completer: ActionCompleter,
    command_completer: CommandCompleter,
    path_completer: PathCompleter,
    highlighter: SyntaxHighlighter,
}

impl ShellCompleter {
    pub fn new<'a>(
        actions: impl IntoIterator<Item = &'a str>,
        working_dir: impl Into<PathBuf>,
    ) -> Self {
        ShellCompleter {
            action_completer: ActionCompleter::new(actions),
            command_completer: CommandCompleter::new(),
            path_completer: PathCompleter::new(working_dir),
            highlighter: SyntaxHighlighter::new(),
        }
    }

    pub fn update_aliases<'a>(&mut self, aliases: impl IntoIterator<Item = &'a str>) {
        self.command_completer.set_aliases(aliases);
    }

    pub fn set_working_dir(&mut self, dir: impl Into<PathBuf>) {
        self.path_completer.set_base(dir);
    }

    fn candidates(&self, line_up_to_cursor: &str) -> (usize, Vec<Pair>) {
        let pos = line_up_to_cursor.len();
        let mut words: Vec<&str> = line_up_to_cursor.split_whitespace().collect();
        if line_up_to_cursor.is_empty() || line_up_to_cursor.ends_with(char::is_whitespace) {
            words.push("");
        }

        let last_word = words.last().copied().unwrap_or("");
        let start = pos - last_word.len();

        let matches = if words.len() == 1 {
            if last_word.starts_with(':') {
                self.action_completer.complete_action(last_word)
            } else {
                self.command_completer.complete_command(last_word)
            }
        } else {
            self.path_completer.complete_path(last_word)
        };

        (start, matches)
    }
}

impl Helper for ShellCompleter {}

impl Highlighter for ShellCompleter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(self.highlighter.highlight_command(line))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(self.highlighter.highlight_hint(hint))
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;
}

impl Validator for ShellCompleter {}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(&line[..pos]))
    }
}
