use rustyline::{error::ReadlineError, history::FileHistory, Editor};

use crate::core::Prompter;
use crate::input::ShellCompleter;

/// Asks for missing action parameters on the line editor. Ctrl-C or Ctrl-D
/// at the prompt counts as giving up.
pub struct EditorPrompter<'a> {
    editor: &'a mut Editor<ShellCompleter, FileHistory>,
}

impl<'a> EditorPrompter<'a> {
    pub fn new(editor: &'a mut Editor<ShellCompleter, FileHistory>) -> Self {
        Self { editor }
    }
}

impl Prompter for EditorPrompter<'_> {
    fn ask(&mut self, title: &str, question: &str) -> Option<String> {
        match self.editor.readline(&format!("{} - {} ", title, question)) {
            Ok(answer) => Some(answer),
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => None,
            Err(e) => {
                tracing::warn!(error = %e, "prompt failed");
                None
            }
        }
    }
}
