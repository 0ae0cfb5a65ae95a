use super::{Command, CommandError, Context, Invocation};
use crate::core::scrollback::Line;
use crate::tree::TreeNode;

/// Tree listing of the working directory, one row appended at a time.
#[derive(Clone, Debug, Default)]
pub struct ListCommand;

impl Command for ListCommand {
    fn execute(&self, inv: &mut Invocation<'_>) -> Result<(), CommandError> {
        inv.out.append(Line::echo("ls"));

        let tree = TreeNode::scan(inv.session.working_dir()).context("listing directory")?;
        tracing::debug!(nodes = tree.node_count(), "rendering directory tree");

        for row in tree.lines() {
            inv.out.append(Line::tree_row(row));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Harness;
    use super::*;
    use crate::core::scrollback::LineKind;
    use std::fs;

    #[test]
    fn test_ls_renders_tree_rows() {
        let mut h = Harness::new();
        fs::create_dir(h.root().join("src")).unwrap();
        fs::write(h.root().join("src/main.rs"), "").unwrap();
        fs::write(h.root().join("Cargo.toml"), "").unwrap();

        h.run(&ListCommand, "").unwrap();
        let root = h.root().display().to_string();
        assert_eq!(
            h.texts(),
            vec!["$ ls", root.as_str(), "├── Cargo.toml", "└── src", "    └── main.rs"]
        );
        assert!(h.scrollback.lines()[1..]
            .iter()
            .all(|l| l.kind == LineKind::TreeRow));
    }

    #[test]
    fn test_ls_of_vanished_directory() {
        let mut h = Harness::new();
        fs::create_dir(h.root().join("tmp")).unwrap();
        h.session.change_dir("tmp").unwrap();
        fs::remove_dir(h.session.working_dir()).unwrap();

        let err = h.run(&ListCommand, "").unwrap_err();
        assert!(err.to_string().starts_with("Error listing directory:"));
        assert_eq!(h.texts(), vec!["$ ls"]);
    }
}
