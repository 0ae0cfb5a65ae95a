use std::borrow::Cow;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use super::{Config, ConfigError};
use crate::path::PathExpander;

/// Applies rc file directives (`alias`, `export`, `set`) to a [`Config`].
pub struct ConfigLoader<'a> {
    config: &'a mut Config,
    path_expander: PathExpander,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(config: &'a mut Config) -> Self {
        Self {
            config,
            path_expander: PathExpander::new(),
        }
    }

    pub fn source_if_exists(&mut self, path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no rc file");
            return Ok(());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        for (number, line) in content.lines().enumerate() {
            self.process_line(number + 1, line);
        }
        tracing::info!(path = %path.display(), aliases = self.config.aliases.len(), "loaded rc file");
        Ok(())
    }

    fn process_line(&mut self, number: usize, line: &str) {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return;
        }

        match line {
            s if s.starts_with("alias ") => self.process_alias(&s["alias ".len()..]),
            s if s.starts_with("export ") => self.process_export(&s["export ".len()..]),
            s if s.starts_with("set ") => self.process_setting(&s["set ".len()..]),
            _ => tracing::warn!(line = number, directive = line, "ignoring unknown rc directive"),
        }
    }

    fn process_alias(&mut self, definition: &str) {
        if let Some((name, command)) = definition.split_once('=') {
            self.config.aliases.add(name.trim(), unquote(command.trim()));
        }
    }

    fn process_export(&mut self, definition: &str) {
        let Some((name, value)) = definition.split_once('=') else {
            return;
        };
        let name = name.trim();
        if name.is_empty() {
            return;
        }

        let value = self.expand_value(unquote(value.trim())).into_owned();
        self.config.exports.insert(name.to_string(), value);
    }

    fn process_setting(&mut self, definition: &str) {
        let Some((key, value)) = definition.split_once('=') else {
            tracing::warn!(definition, "setting needs key=value");
            return;
        };
        let key = key.trim();
        let value = unquote(value.trim());
        let settings = &mut self.config.settings;

        match key {
            "tree_delay_ms" => match value.parse::<u64>() {
                Ok(ms) => settings.tree_delay = Duration::from_millis(ms),
                Err(_) => tracing::warn!(key, value, "expected a number of milliseconds"),
            },
            "history_size" => match value.parse::<usize>() {
                Ok(size) => settings.history_size = size,
                Err(_) => tracing::warn!(key, value, "expected a number"),
            },
            "shell" if !value.is_empty() => settings.shell = value.to_string(),
            "search_program" if !value.is_empty() => settings.search_program = value.to_string(),
            "history_file" if value.is_empty() => settings.history_file = None,
            "history_file" => match self.path_expander.expand(value) {
                Ok(path) => settings.history_file = Some(path),
                Err(e) => tracing::warn!(key, value, error = %e, "cannot expand path"),
            },
            _ => tracing::warn!(key, value, "ignoring unknown setting"),
        }
    }

    /// Replaces `$NAME` and `${NAME}` with earlier exports or the process
    /// environment; unknown names expand to nothing.
    fn expand_value<'v>(&self, value: &'v str) -> Cow<'v, str> {
        if !value.contains('$') {
            return Cow::Borrowed(value);
        }

        let mut result = String::with_capacity(value.len());
        let mut rest = value;
        while let Some(dollar) = rest.find('$') {
            result.push_str(&rest[..dollar]);
            let after = &rest[dollar + 1..];

            let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
                match braced.find('}') {
                    Some(end) => (&braced[..end], end + 2),
                    None => ("", 0),
                }
            } else {
                let end = after
                    .find(|c: char| !c.is_alphanumeric() && c != '_')
                    .unwrap_or(after.len());
                (&after[..end], end)
            };

            if name.is_empty() {
                result.push('$');
                rest = after;
                continue;
            }

            result.push_str(&self.lookup(name));
            rest = &after[consumed..];
        }
        result.push_str(rest);
        Cow::Owned(result)
    }

    fn lookup(&self, name: &str) -> String {
        self.config
            .exports
            .get(name)
            .cloned()
            .or_else(|| env::var(name).ok())
            .unwrap_or_default()
    }
}

fn unquote(value: &str) -> &str {
    let quoted = value.len() >= 2
        && ((value.starts_with('\'') && value.ends_with('\''))
            || (value.starts_with('"') && value.ends_with('"')));
    if quoted {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::super::ConfigPaths;
    use super::*;
    use std::path::PathBuf;

    fn config_from(content: &str) -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let rc = dir.path().join("vishrc");
        fs::write(&rc, content).unwrap();

        let paths = ConfigPaths {
            rc_path: rc,
            history_path: dir.path().join("history"),
        };
        let mut config = Config::new(paths);
        config.load().unwrap();
        (dir, config)
    }

    #[test]
    fn test_aliases_and_comments() {
        let (_dir, config) = config_from(
            "# my aliases\n\
             alias ll='ls -la'\n\
             alias gs=\"git status\"\n",
        );
        assert_eq!(config.aliases().get("ll"), Some("ls -la"));
        assert_eq!(config.aliases().get("gs"), Some("git status"));
        assert_eq!(config.aliases().expand_command("ll /tmp"), "ls -la /tmp");
    }

    #[test]
    fn test_settings() {
        let (_dir, config) = config_from(
            "set tree_delay_ms=0\n\
             set history_size = 50\n\
             set shell=/bin/bash\n\
             set search_program=rg\n\
             set history_file=\n",
        );
        let settings = config.settings();
        assert_eq!(settings.tree_delay, Duration::ZERO);
        assert_eq!(settings.history_size, 50);
        assert_eq!(settings.shell, "/bin/bash");
        assert_eq!(settings.search_program, "rg");
        assert_eq!(settings.history_file, None);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let (dir, config) = config_from("set tree_delay_ms=soon\nset colour=blue\nbogus line\n");
        assert_eq!(config.settings().tree_delay, Duration::from_millis(100));
        assert_eq!(config.settings().history_file, Some(dir.path().join("history")));
    }

    #[test]
    fn test_exports_expand_variables() {
        env::set_var("VISH_LOADER_BASE", "/opt");
        let (_dir, config) = config_from(
            "export TOOLS=$VISH_LOADER_BASE/tools\n\
             export BIN=\"${TOOLS}/bin:$VISH_LOADER_UNSET\"\n\
             export PRICE=5$\n",
        );
        assert_eq!(config.exports()["TOOLS"], "/opt/tools");
        assert_eq!(config.exports()["BIN"], "/opt/tools/bin:");
        assert_eq!(config.exports()["PRICE"], "5$");
    }

    #[test]
    fn test_history_file_tilde() {
        let (_dir, config) = config_from("set history_file=~/.custom_history\n");
        let home = dirs::home_dir().unwrap();
        assert_eq!(
            config.settings().history_file,
            Some(PathBuf::from(home).join(".custom_history"))
        );
    }

    #[test]
    fn test_missing_rc_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ConfigPaths {
            rc_path: dir.path().join("absent"),
            history_path: dir.path().join("history"),
        };
        let mut config = Config::new(paths);
        assert!(config.load().is_ok());
        assert!(config.aliases().is_empty());
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("'a'"), "a");
        assert_eq!(unquote("\"a b\""), "a b");
        assert_eq!(unquote("'"), "'");
        assert_eq!(unquote("plain"), "plain");
    }
}
