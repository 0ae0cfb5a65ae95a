use std::path::PathBuf;

use super::commands::CommandError;

/// Asks the user for values an action was not given on its command line.
///
/// `None` (or an empty answer) means the user gave up; the action is then
/// dropped without output.
pub trait Prompter {
    fn ask(&mut self, title: &str, question: &str) -> Option<String>;

    /// Picks an existing file. Defaults to asking for its path.
    fn pick_file(&mut self, title: &str) -> Option<PathBuf> {
        self.ask(title, "Enter file path:").map(PathBuf::from)
    }
}

/// Parameters of one action: words from the rest of the input line first,
/// prompts for whatever is missing.
pub struct Params<'a> {
    rest: &'a str,
    prompter: &'a mut dyn Prompter,
}

impl<'a> Params<'a> {
    pub fn new(rest: &'a str, prompter: &'a mut dyn Prompter) -> Self {
        Self {
            rest: rest.trim(),
            prompter,
        }
    }

    /// Next whitespace-separated word.
    pub fn word(&mut self, title: &str, question: &str) -> Result<String, CommandError> {
        if self.rest.is_empty() {
            return self.ask(title, question);
        }

        let (word, rest) = self
            .rest
            .split_once(char::is_whitespace)
            .unwrap_or((self.rest, ""));
        self.rest = rest.trim_start();
        Ok(word.to_string())
    }

    /// Everything left on the line.
    pub fn text(&mut self, title: &str, question: &str) -> Result<String, CommandError> {
        if self.rest.is_empty() {
            return self.ask(title, question);
        }
        Ok(std::mem::take(&mut self.rest).to_string())
    }

    /// A file chosen with the picker when none was typed.
    pub fn file(&mut self, title: &str) -> Result<String, CommandError> {
        if !self.rest.is_empty() {
            return self.word(title, "");
        }
        match self.prompter.pick_file(title) {
            Some(path) if !path.as_os_str().is_empty() => Ok(path.to_string_lossy().into_owned()),
            _ => Err(CommandError::Cancelled),
        }
    }

    /// Fails when words are left over after the last parameter.
    pub fn finish(&self) -> Result<(), CommandError> {
        if self.rest.is_empty() {
            Ok(())
        } else {
            Err(CommandError::InvalidArguments(format!(
                "unexpected '{}'",
                self.rest
            )))
        }
    }

    fn ask(&mut self, title: &str, question: &str) -> Result<String, CommandError> {
        match self.prompter.ask(title, question) {
            Some(answer) if !answer.trim().is_empty() => Ok(answer.trim().to_string()),
            _ => Err(CommandError::Cancelled),
        }
    }
}

/// Answers prompts from a fixed list, then gives up.
#[cfg(test)]
pub struct ScriptedPrompter {
    answers: std::collections::VecDeque<String>,
    pub asked: Vec<String>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|s| s.to_string()).collect(),
            asked: Vec::new(),
        }
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn ask(&mut self, _title: &str, question: &str) -> Option<String> {
        self.asked.push(question.to_string());
        self.answers.pop_front()
    }
}
