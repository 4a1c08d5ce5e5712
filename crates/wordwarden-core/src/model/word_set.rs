/// The ordered list of literal substrings a scan looks for.
use serde::Serialize;

/// Ordered, immutable list of non-empty forbidden words.
///
/// Duplicates are kept: a word listed twice is counted twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ForbiddenWordSet {
    words: Vec<String>,
}

impl ForbiddenWordSet {
    /// Split a comma-separated string, trim each piece and drop empty ones.
    pub fn parse(raw: &str) -> Self {
        let words = raw
            .split(',')
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_owned)
            .collect();
        Self { words }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}
