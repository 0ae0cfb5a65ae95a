use std::borrow::Cow;
use std::collections::BTreeMap;

/// `alias` definitions from the rc file. Only the first word of a typed
/// command is ever replaced.
#[derive(Debug, Clone, Default)]
pub struct AliasManager {
    aliases: BTreeMap<Box<str>, Box<str>>,
}

impl AliasManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str, command: &str) {
        self.aliases.insert(name.into(), command.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(|s| &**s)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.aliases.keys().map(|k| &**k)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Replaces the leading word when it names an alias; the rest of the
    /// line is kept byte for byte.
    pub fn expand_command<'a>(&self, command: &'a str) -> Cow<'a, str> {
        let trimmed = command.trim_start();
        let (first, rest) = match trimmed.find(char::is_whitespace) {
            Some(idx) => trimmed.split_at(idx),
            None => (trimmed, ""),
        };

        match self.get(first) {
            Some(value) => Cow::Owned(format!("{}{}", value, rest)),
            None => Cow::Borrowed(command),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_first_word_only() {
        let mut manager = AliasManager::new();
        manager.add("ll", "ls -la");

        assert_eq!(manager.expand_command("ll /home"), "ls -la /home");
        assert_eq!(manager.expand_command("echo ll"), "echo ll");
    }

    #[test]
    fn test_expansion_keeps_spacing() {
        let mut manager = AliasManager::new();
        manager.add("say", "echo");
        assert_eq!(manager.expand_command("say 'a   b'"), "echo 'a   b'");
        assert_eq!(manager.expand_command("say"), "echo");
    }

    #[test]
    fn test_no_expansion_borrows() {
        let manager = AliasManager::new();
        let expanded = manager.expand_command("ls -l");
        assert!(matches!(expanded, Cow::Borrowed(_)));
    }

    #[test]
    fn test_names_sorted() {
        let mut manager = AliasManager::new();
        manager.add("gs", "git status");
        manager.add("ll", "ls -la");
        manager.add("gd", "git diff");
        assert_eq!(manager.names().collect::<Vec<_>>(), vec!["gd", "gs", "ll"]);
        assert_eq!(manager.len(), 3);
    }
}
