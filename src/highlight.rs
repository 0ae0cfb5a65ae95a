use inksac::prelude::*;

use crate::core::{Line, LineKind};

#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    fn enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    /// Input line: action names in cyan, the program of a typed command in
    /// green, flags in yellow. Whitespace is kept as typed so the cursor
    /// stays aligned with the edit buffer.
    pub fn highlight_command(&self, input: &str) -> String {
        if !self.enabled() {
            return input.to_string();
        }

        let mut highlighted = String::with_capacity(input.len());
        let mut rest = input;
        let mut first = true;

        while !rest.is_empty() {
            let word_start = rest.len() - rest.trim_start().len();
            highlighted.push_str(&rest[..word_start]);
            rest = &rest[word_start..];

            let word_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            let (word, tail) = rest.split_at(word_end);
            if !word.is_empty() {
                highlighted.push_str(&self.highlight_word(word, first));
                first = false;
            }
            rest = tail;
        }

        highlighted
    }

    fn highlight_word(&self, word: &str, is_head: bool) -> String {
        if is_head {
            let head_color = if word.starts_with(':') {
                Color::Cyan
            } else {
                Color::Green
            };
            let head_style = Style::builder().foreground(head_color).bold().build();
            return word.style(head_style).to_string();
        }

        if word.starts_with('-') {
            let flag_style = Style::builder().foreground(Color::Yellow).build();
            return word.style(flag_style).to_string();
        }

        word.to_string()
    }

    /// Scrollback line as printed on the terminal.
    pub fn highlight_line(&self, line: &Line) -> String {
        match line.kind {
            LineKind::Echo => self.highlight_echo(&line.text),
            LineKind::Directory => self.highlight_directory(&line.text),
            LineKind::Error => self.highlight_error(&line.text),
            LineKind::Output | LineKind::TreeRow => line.text.clone(),
        }
    }

    pub fn highlight_echo(&self, echo: &str) -> String {
        if !self.enabled() {
            return echo.to_string();
        }

        let echo_style = Style::builder().foreground(Color::Cyan).bold().build();
        echo.style(echo_style).to_string()
    }

    pub fn highlight_directory(&self, banner: &str) -> String {
        if !self.enabled() {
            return banner.to_string();
        }

        let dir_style = Style::builder().foreground(Color::Cyan).build();
        banner.style(dir_style).to_string()
    }

    pub fn highlight_error(&self, error: &str) -> String {
        if !self.enabled() {
            return error.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();
        error.style(error_style).to_string()
    }

    pub fn highlight_hint(&self, hint: &str) -> String {
        if !self.enabled() {
            return hint.to_string();
        }

        let hint_style = Style::builder()
            .foreground(Color::RGB(128, 128, 128))
            .build();
        hint.style(hint_style).to_string()
    }
}
