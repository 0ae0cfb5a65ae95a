//! Directory tree listing.
//!
//! [`TreeNode::scan`] walks a directory into an owned tree, and
//! [`TreeNode::lines`] turns it into a lazy sequence of `tree`-style lines:
//!
//! ```text
//! /srv/project
//! ├── src
//! │   └── main.rs
//! └── README.md
//! ```

mod walk;

pub use walk::{find_named, read_sorted, Entry};

use std::io;
use std::iter::Peekable;
use std::path::Path;
use std::vec;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn push(&mut self, child: TreeNode) {
        self.children.push(child);
    }

    /// Total number of nodes, root included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }

    /// Walks `root` from scratch. The root itself must be a directory;
    /// unreadable subdirectories appear as leaves.
    pub fn scan(root: &Path) -> io::Result<TreeNode> {
        let metadata = root.metadata()?;
        if !metadata.is_dir() {
            return Err(io::Error::other(format!(
                "Not a directory: '{}'",
                root.display()
            )));
        }

        let mut node = TreeNode::new(root.display().to_string());
        fill(&mut node, root);
        Ok(node)
    }

    pub fn lines(self) -> TreeLines {
        TreeLines::new(self)
    }
}

fn fill(node: &mut TreeNode, dir: &Path) {
    let Some(entries) = read_sorted(dir) else {
        return;
    };

    for entry in entries {
        let mut child = TreeNode::new(entry.name);
        if entry.descend {
            fill(&mut child, &entry.path);
        }
        node.push(child);
    }
}

struct Level {
    children: Peekable<vec::IntoIter<TreeNode>>,
    prefix: String,
}

/// Lines of a rendered [`TreeNode`], produced on demand.
pub struct TreeLines {
    root: Option<String>,
    stack: Vec<Level>,
}

impl TreeLines {
    fn new(root: TreeNode) -> Self {
        Self {
            root: Some(root.label),
            stack: vec![Level {
                children: root.children.into_iter().peekable(),
                prefix: String::new(),
            }],
        }
    }
}

impl Iterator for TreeLines {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if let Some(root) = self.root.take() {
            return Some(root);
        }

        loop {
            let level = self.stack.last_mut()?;
            let Some(node) = level.children.next() else {
                self.stack.pop();
                continue;
            };

            let is_last = level.children.peek().is_none();
            let connector = if is_last { LAST_BRANCH } else { BRANCH };
            let line = format!("{}{}{}", level.prefix, connector, node.label);

            if !node.children.is_empty() {
                let prefix = format!("{}{}", level.prefix, if is_last { SPACE } else { PIPE });
                self.stack.push(Level {
                    children: node.children.into_iter().peekable(),
                    prefix,
                });
            }

            return Some(line);
        }
    }
}
