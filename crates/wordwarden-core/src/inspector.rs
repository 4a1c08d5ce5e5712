/// Per-file forbidden-word detection.
///
/// Reads the whole file as UTF-8 text and counts non-overlapping literal
/// occurrences of every word, in word-list order. Pure apart from the read.
use crate::error::ScanError;
use crate::model::ForbiddenWordSet;
use std::path::Path;

/// Occurrences of one forbidden word in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

/// Result of inspecting a single file.
///
/// `counts` has one slot per entry of the word list, in the same order,
/// so duplicated words appear (and count) twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inspection {
    pub counts: Vec<WordCount>,
}

impl Inspection {
    /// `true` when any word occurs at least once.
    pub fn matched(&self) -> bool {
        self.counts.iter().any(|c| c.count > 0)
    }

    /// Sum over every list entry.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|c| c.count).sum()
    }

    /// Occurrences recorded for `word`, summed across duplicate entries.
    pub fn count_for(&self, word: &str) -> u64 {
        self.counts
            .iter()
            .filter(|c| c.word == word)
            .map(|c| c.count)
            .sum()
    }
}

/// Count non-overlapping occurrences of `word` in `text`.
///
/// Equivalent to splitting `text` on `word` and subtracting one from the
/// number of pieces.
pub fn count_occurrences(text: &str, word: &str) -> u64 {
    if word.is_empty() {
        return 0;
    }
    text.matches(word).count() as u64
}

/// Inspect already-loaded text.
pub fn inspect_text(text: &str, words: &ForbiddenWordSet) -> Inspection {
    let counts = words
        .iter()
        .map(|word| WordCount {
            word: word.to_owned(),
            count: count_occurrences(text, word),
        })
        .collect();
    Inspection { counts }
}

/// Read `path` and inspect its content.
///
/// Fails with [`ScanError::Read`] when the file is missing, locked,
/// unreadable or not valid UTF-8.
pub fn inspect(path: &Path, words: &ForbiddenWordSet) -> Result<Inspection, ScanError> {
    let text = std::fs::read_to_string(path).map_err(|source| ScanError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(inspect_text(&text, words))
}
