use std::{
    fs,
    path::{Path, PathBuf},
};

use rustyline::completion::Pair;

use crate::path::PathExpander;

/// Completes file names relative to the session's working directory.
#[derive(Clone, Debug)]
pub struct PathCompleter {
    base: PathBuf,
    path_expander: PathExpander,
}

impl PathCompleter {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            path_expander: PathExpander::new(),
        }
    }

    pub fn set_base(&mut self, base: impl Into<PathBuf>) {
        self.base = base.into();
    }

    pub fn complete_path(&self, incomplete: &str) -> Vec<Pair> {
        // What the user typed up to the last separator stays as typed.
        let (typed_dir, file_prefix) = match incomplete.rfind('/') {
            Some(idx) => incomplete.split_at(idx + 1),
            None => ("", incomplete),
        };

        let Some(dir_to_search) = self.search_dir(typed_dir) else {
            return Vec::new();
        };

        let mut matches = Vec::new();
        if let Ok(entries) = fs::read_dir(&dir_to_search) {
            for entry in entries.filter_map(Result::ok) {
                let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                    continue;
                };
                if !name.starts_with(file_prefix) {
                    continue;
                }
                // Hidden files only when asked for.
                if name.starts_with('.') && !file_prefix.starts_with('.') {
                    continue;
                }
                matches.push(self.create_completion_pair(typed_dir, &name, &entry.path()));
            }
        }

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }

    fn search_dir(&self, typed_dir: &str) -> Option<PathBuf> {
        if typed_dir.is_empty() {
            return Some(self.base.clone());
        }
        self.path_expander.resolve(&self.base, typed_dir).ok()
    }

    fn create_completion_pair(&self, typed_dir: &str, name: &str, path: &Path) -> Pair {
        if path.is_dir() {
            Pair {
                display: format!("{}/", name),
                replacement: format!("{}{}/", typed_dir, name),
            }
        } else {
            Pair {
                display: name.to_string(),
                replacement: format!("{}{} ", typed_dir, name),
            }
        }
    }
}
