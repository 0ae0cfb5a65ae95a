/// Commands typed by the user during this session, oldest first.
///
/// Built-in actions are never recorded here.
#[derive(Debug, Default, Clone)]
pub struct CommandHistory {
    entries: Vec<String>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: &str) {
        if command.trim().is_empty() {
            return;
        }
        self.entries.push(command.to_owned());
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// `"1: first"`, `"2: second"`, ...
    pub fn numbered(&self) -> impl Iterator<Item = String> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(idx, command)| format!("{}: {}", idx + 1, command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_keeps_insertion_order() {
        let mut history = CommandHistory::new();
        history.push("echo a");
        history.push("echo b");
        history.push("echo a");

        let lines: Vec<String> = history.numbered().collect();
        assert_eq!(lines, vec!["1: echo a", "2: echo b", "3: echo a"]);
    }

    #[test]
    fn test_blank_commands_ignored() {
        let mut history = CommandHistory::new();
        history.push("   ");
        history.push("");
        assert!(history.entries().is_empty());
    }
}
