use std::{collections::BTreeSet, env, fs};

use rustyline::completion::Pair;

/// Completes the first word of a typed command: executables on `PATH`
/// and rc file aliases.
#[derive(Clone, Debug, Default)]
pub struct CommandCompleter {
    commands: BTreeSet<String>,
    aliases: BTreeSet<String>,
}

impl CommandCompleter {
    pub fn new() -> Self {
        let mut completer = Self::default();
        completer.refresh_commands();
        completer
    }

    pub fn refresh_commands(&mut self) {
        self.commands.clear();
        if let Some(path_var) = env::var_os("PATH") {
            for path in env::split_paths(&path_var) {
                self.add_dir(&path);
            }
        }
        tracing::debug!(count = self.commands.len(), "indexed PATH commands");
    }

    fn add_dir(&mut self, dir: &std::path::Path) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };
        for entry in entries.filter_map(Result::ok) {
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            if file_type.is_file() || file_type.is_symlink() {
                if let Some(name) = entry.file_name().to_str() {
                    self.commands.insert(name.to_string());
                }
            }
        }
    }

    pub fn set_aliases<'a>(&mut self, aliases: impl IntoIterator<Item = &'a str>) {
        self.aliases = aliases.into_iter().map(str::to_string).collect();
    }

    pub fn complete_command(&self, word: &str) -> Vec<Pair> {
        let mut matches: Vec<Pair> = self
            .aliases
            .iter()
            .filter(|alias| alias.starts_with(word))
            .map(|alias| Pair {
                display: format!("{} (alias)", alias),
                replacement: format!("{} ", alias),
            })
            .collect();

        matches.extend(
            self.commands
                .iter()
                .filter(|cmd| cmd.starts_with(word) && !self.aliases.contains(*cmd))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: format!("{} ", cmd),
                }),
        );
        matches
    }
}
