use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

mod aliases;
mod loader;
mod paths;

pub use aliases::AliasManager;
pub use paths::ConfigPaths;

use loader::ConfigLoader;

use crate::process::executor::default_shell;

/// Tunables settable with `set key=value` in the rc file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Pause after each tree row; zero prints the listing at once.
    pub tree_delay: Duration,
    /// Entries kept by the line editor's recall history.
    pub history_size: usize,
    pub shell: String,
    pub search_program: String,
    /// Line editor recall file; `None` keeps recall in memory only.
    pub history_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tree_delay: Duration::from_millis(100),
            history_size: 1000,
            shell: default_shell(),
            search_program: "grep".to_string(),
            history_file: None,
        }
    }
}

pub struct Config {
    paths: ConfigPaths,
    aliases: AliasManager,
    exports: BTreeMap<String, String>,
    settings: Settings,
}

impl Config {
    pub fn new(paths: ConfigPaths) -> Self {
        let settings = Settings {
            history_file: Some(paths.history_path.clone()),
            ..Settings::default()
        };

        Config {
            paths,
            aliases: AliasManager::new(),
            exports: BTreeMap::new(),
            settings,
        }
    }

    /// Reads the rc file if there is one.
    pub fn load(&mut self) -> Result<(), ConfigError> {
        let rc_path = self.paths.rc_path.clone();
        ConfigLoader::new(self).source_if_exists(&rc_path)
    }

    pub fn rc_path(&self) -> &Path {
        &self.paths.rc_path
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn aliases(&self) -> &AliasManager {
        &self.aliases
    }

    /// Variables added to the environment of spawned processes.
    pub fn exports(&self) -> &BTreeMap<String, String> {
        &self.exports
    }
}

#[derive(Debug)]
pub enum ConfigError {
    HomeDirNotFound,
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::HomeDirNotFound => write!(f, "Home directory not found"),
            ConfigError::ReadFailed { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
