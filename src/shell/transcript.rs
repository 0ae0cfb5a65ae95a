use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crate::core::{Line, LineKind, Scrollback, Transcript};
use crate::highlight::SyntaxHighlighter;

/// Prints every appended line as it arrives and keeps a copy in the
/// scrollback. Tree rows are paced by `tree_delay`.
pub struct TerminalTranscript {
    scrollback: Scrollback,
    highlighter: SyntaxHighlighter,
    tree_delay: Duration,
}

impl TerminalTranscript {
    pub fn new(tree_delay: Duration) -> Self {
        Self {
            scrollback: Scrollback::new(),
            highlighter: SyntaxHighlighter::new(),
            tree_delay,
        }
    }

    pub fn scrollback(&self) -> &Scrollback {
        &self.scrollback
    }
}

impl Transcript for TerminalTranscript {
    fn append(&mut self, line: Line) {
        let mut stdout = io::stdout().lock();
        // A closed stdout only loses the echo; the scrollback keeps the line.
        let _ = writeln!(stdout, "{}", self.highlighter.highlight_line(&line));
        let _ = stdout.flush();
        drop(stdout);

        if line.kind == LineKind::TreeRow && !self.tree_delay.is_zero() {
            thread::sleep(self.tree_delay);
        }
        self.scrollback.append(line);
    }
}
