use std::fs;
use std::path::{Path, PathBuf};

/// A single directory entry as seen by the walkers.
#[derive(Debug, Clone)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    /// Real directory (symlinks are never followed).
    pub descend: bool,
}

/// Reads `dir` and returns its entries sorted by name, or `None` when the
/// directory cannot be read. Entries whose type cannot be determined are
/// dropped.
pub fn read_sorted(dir: &Path) -> Option<Vec<Entry>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "skipping unreadable directory");
            return None;
        }
    };

    let mut out: Vec<Entry> = entries
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let file_type = entry.file_type().ok()?;
            Some(Entry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path(),
                descend: file_type.is_dir(),
            })
        })
        .collect();

    out.sort_by(|a, b| a.name.cmp(&b.name));
    Some(out)
}

/// Collects `dir/target` for every directory under `root` (inclusive) that
/// holds an entry named exactly `target`, in pre-order.
pub fn find_named(root: &Path, target: &str) -> Vec<PathBuf> {
    let mut found = Vec::new();
    visit(root, target, &mut found);
    found
}

fn visit(dir: &Path, target: &str, found: &mut Vec<PathBuf>) {
    let Some(entries) = read_sorted(dir) else {
        return;
    };

    if entries.iter().any(|e| e.name == target) {
        found.push(dir.join(target));
    }

    for entry in entries.iter().filter(|e| e.descend) {
        visit(&entry.path, target, found);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_read_sorted_orders_by_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "").unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("c.txt"), "").unwrap();

        let names: Vec<String> = read_sorted(dir.path())
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["a", "b.txt", "c.txt"]);
    }

    #[test]
    fn test_read_sorted_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_sorted(&dir.path().join("gone")).is_none());
    }

    #[test]
    fn test_find_named_matches_files_and_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/target")).unwrap();
        fs::write(root.join("target"), "").unwrap();
        fs::create_dir_all(root.join("docs")).unwrap();
        fs::write(root.join("docs/target"), "").unwrap();

        let found = find_named(root, "target");
        assert_eq!(
            found,
            vec![root.join("target"), root.join("docs/target"), root.join("src/target")]
        );
    }

    #[test]
    fn test_find_named_requires_exact_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("targets"), "").unwrap();
        assert!(find_named(dir.path(), "target").is_empty());
    }
}
