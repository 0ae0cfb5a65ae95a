use std::io;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct PathExpander;

impl Default for PathExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl PathExpander {
    pub fn new() -> Self {
        Self
    }

    pub fn expand(&self, path: &str) -> io::Result<PathBuf> {
        if path.starts_with('~') {
            self.expand_tilde(path)
        } else {
            Ok(Path::new(path).to_path_buf())
        }
    }

    /// Expands `path` and anchors it at `base` unless it is already absolute.
    pub fn resolve(&self, base: &Path, path: &str) -> io::Result<PathBuf> {
        let expanded = self.expand(path)?;
        if expanded.is_absolute() {
            Ok(expanded)
        } else {
            Ok(base.join(expanded))
        }
    }

    fn expand_tilde(&self, path: &str) -> io::Result<PathBuf> {
        if path.len() == 1 {
            // Just "~"
            self.get_home_dir()
        } else {
            let without_tilde = &path[1..];
            if let Some(stripped) = without_tilde.strip_prefix('/') {
                // "~/path"
                let mut home_path = self.get_home_dir()?;
                for part in stripped.split('/') {
                    if !part.is_empty() {
                        home_path.push(part);
                    }
                }
                Ok(home_path)
            } else {
                // "~username/path" is left alone
                Ok(Path::new(path).to_path_buf())
            }
        }
    }

    pub fn get_home_dir(&self) -> io::Result<PathBuf> {
        dirs::home_dir()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "Home directory not found"))
    }
}
