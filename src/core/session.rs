use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::history::CommandHistory;
use crate::path::PathExpander;

/// Mutable state shared by every action: the working directory and the
/// typed-command history.
#[derive(Debug, Clone)]
pub struct Session {
    working_dir: PathBuf,
    history: CommandHistory,
    path_expander: PathExpander,
}

impl Session {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            history: CommandHistory::new(),
            path_expander: PathExpander::new(),
        }
    }

    /// Starts in the directory the process was launched from.
    pub fn from_current_dir() -> io::Result<Self> {
        let dir = env::current_dir()?;
        let dir = fs::canonicalize(&dir).unwrap_or(dir);
        Ok(Self::new(dir))
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Expands `~` and anchors relative paths at the working directory.
    pub fn resolve(&self, path: &str) -> io::Result<PathBuf> {
        self.path_expander.resolve(&self.working_dir, path)
    }

    /// Moves to `target`. On failure the working directory is left as is.
    pub fn change_dir(&mut self, target: &str) -> io::Result<&Path> {
        let canonical = fs::canonicalize(self.resolve(target)?)?;
        if !canonical.is_dir() {
            return Err(io::Error::other(format!(
                "Not a directory: '{}'",
                canonical.display()
            )));
        }

        tracing::info!(from = %self.working_dir.display(), to = %canonical.display(), "changed directory");
        self.working_dir = canonical;
        Ok(&self.working_dir)
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut CommandHistory {
        &mut self.history
    }
}
