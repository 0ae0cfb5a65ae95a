use std::fs;
use std::path::Path;

use super::{Command, CommandError, Context, Invocation};
use crate::core::scrollback::Line;

/// Invalid UTF-8 is replaced rather than rejected.
fn read_text(path: &Path) -> Result<String, CommandError> {
    let bytes = fs::read(path).context("reading file")?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Prints a file named relative to the working directory.
#[derive(Clone, Debug, Default)]
pub struct CatCommand;

impl Command for CatCommand {
    fn execute(&self, inv: &mut Invocation<'_>) -> Result<(), CommandError> {
        let name = inv.params.text("View File Content", "Enter file name:")?;
        let path = inv.session.resolve(&name).context("reading file")?;
        let content = read_text(&path)?;

        inv.out.append(Line::echo(format!("cat {}", name)));
        inv.out.append_block(&content);
        Ok(())
    }
}

/// Prints any file chosen with the picker.
#[derive(Clone, Debug, Default)]
pub struct ReadCommand;

impl Command for ReadCommand {
    fn execute(&self, inv: &mut Invocation<'_>) -> Result<(), CommandError> {
        let picked = inv.params.file("Select File to Read")?;
        inv.params.finish()?;
        let path = inv.session.resolve(&picked).context("reading file")?;
        let content = read_text(&path)?;

        inv.out.append(Line::echo(format!("read {}", path.display())));
        inv.out.append_block(&content);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Harness;
    use super::*;

    #[test]
    fn test_cat_prints_lines() {
        let mut h = Harness::new();
        fs::write(h.root().join("notes.txt"), "first\nsecond\n").unwrap();

        h.run(&CatCommand, "notes.txt").unwrap();
        assert_eq!(h.texts(), vec!["$ cat notes.txt", "first", "second"]);
    }

    #[test]
    fn test_cat_binary_is_lossy() {
        let mut h = Harness::new();
        fs::write(h.root().join("bin"), [b'o', b'k', 0xff]).unwrap();

        h.run(&CatCommand, "bin").unwrap();
        assert_eq!(h.texts()[1], "ok\u{fffd}");
    }

    #[test]
    fn test_read_absolute_path_from_picker() {
        let mut h = Harness::new();
        let other = tempfile::tempdir().unwrap();
        let file = other.path().join("elsewhere.txt");
        fs::write(&file, "remote").unwrap();
        let picked = file.to_string_lossy().into_owned();

        h.run_with(&ReadCommand, "", &[picked.as_str()]).unwrap();
        assert_eq!(h.texts(), vec![format!("$ read {}", picked), "remote".to_string()]);
    }

    #[test]
    fn test_read_cancelled_picker() {
        let mut h = Harness::new();
        assert!(h.run_with(&ReadCommand, "", &[]).unwrap_err().is_cancelled());
    }

    #[test]
    fn test_cat_directory_is_error() {
        let mut h = Harness::new();
        fs::create_dir(h.root().join("dir")).unwrap();
        let err = h.run(&CatCommand, "dir").unwrap_err();
        assert!(err.to_string().starts_with("Error reading file:"));
    }
}
