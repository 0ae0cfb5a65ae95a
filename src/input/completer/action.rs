use rustyline::completion::Pair;

/// Completes `:`-prefixed built-in action names.
#[derive(Clone, Debug, Default)]
pub struct ActionCompleter {
    names: Vec<String>,
}

impl ActionCompleter {
    pub fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut names: Vec<String> = names.into_iter().map(str::to_string).collect();
        names.sort();
        Self { names }
    }

    /// `word` includes the leading `:`.
    pub fn complete_action(&self, word: &str) -> Vec<Pair> {
        let prefix = word.strip_prefix(':').unwrap_or(word);
        self.names
            .iter()
            .filter(|name| name.starts_with(prefix))
            .map(|name| Pair {
                display: format!(":{}", name),
                replacement: format!(":{} ", name),
            })
            .collect()
    }
}
