#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `$ command` header written before an action's output.
    Echo,
    Output,
    /// `[Directory]: ...` banner.
    Directory,
    Error,
    /// One row of a tree listing; front ends may pace these.
    TreeRow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub kind: LineKind,
    pub text: String,
}

impl Line {
    pub fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn echo(text: impl Into<String>) -> Self {
        Self::new(LineKind::Echo, format!("$ {}", text.into()))
    }

    pub fn output(text: impl Into<String>) -> Self {
        Self::new(LineKind::Output, text)
    }

    pub fn directory(dir: impl std::fmt::Display) -> Self {
        Self::new(LineKind::Directory, format!("[Directory]: {}", dir))
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(LineKind::Error, text)
    }

    pub fn tree_row(text: impl Into<String>) -> Self {
        Self::new(LineKind::TreeRow, text)
    }
}

/// Append-only sink for everything actions print.
pub trait Transcript {
    fn append(&mut self, line: Line);

    /// Appends every line of `text` as its own output line.
    fn append_block(&mut self, text: &str) {
        for line in text.lines() {
            self.append(Line::output(line));
        }
    }
}

/// In-memory scrollback.
#[derive(Debug, Default, Clone)]
pub struct Scrollback {
    lines: Vec<Line>,
}

impl Scrollback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.text.as_str()).collect()
    }
}

impl Transcript for Scrollback {
    fn append(&mut self, line: Line) {
        self.lines.push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_block_splits_lines() {
        let mut scrollback = Scrollback::new();
        scrollback.append(Line::echo("cat notes"));
        scrollback.append_block("one\ntwo\n");

        assert_eq!(scrollback.texts(), vec!["$ cat notes", "one", "two"]);
        assert_eq!(scrollback.lines()[0].kind, LineKind::Echo);
        assert_eq!(scrollback.lines()[2].kind, LineKind::Output);
    }

    #[test]
    fn test_empty_block_adds_nothing() {
        let mut scrollback = Scrollback::new();
        scrollback.append_block("");
        assert!(scrollback.lines().is_empty());
    }
}
