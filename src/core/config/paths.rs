use super::ConfigError;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub rc_path: PathBuf,
    pub history_path: PathBuf,
}

impl ConfigPaths {
    pub fn new() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;

        Ok(ConfigPaths {
            rc_path: home.join(".vishrc"),
            history_path: home.join(".vish_history"),
        })
    }

    pub fn with_rc_path(mut self, rc_path: impl Into<PathBuf>) -> Self {
        self.rc_path = rc_path.into();
        self
    }
}
