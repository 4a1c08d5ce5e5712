/// Global forbidden-word frequency across one scan session.
///
/// Words are kept in first-encountered order so ranking ties resolve
/// deterministically without a secondary key.
use crate::inspector::Inspection;
use serde::Serialize;
use std::collections::HashMap;

/// A word with its cumulative occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordFrequency {
    pub word: String,
    pub count: u64,
}

/// Running totals per word. Counts only grow.
#[derive(Debug, Clone, Default)]
pub struct WordFrequencyTracker {
    entries: Vec<WordFrequency>,
    index: HashMap<String, usize>,
}

impl WordFrequencyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` to `word`, inserting it on first sight.
    ///
    /// Zero counts are ignored so words that never matched stay out of the map.
    pub fn add(&mut self, word: &str, count: u64) {
        if count == 0 {
            return;
        }
        match self.index.get(word) {
            Some(&i) => self.entries[i].count += count,
            None => {
                self.index.insert(word.to_owned(), self.entries.len());
                self.entries.push(WordFrequency {
                    word: word.to_owned(),
                    count,
                });
            }
        }
    }

    /// Merge one file's per-word counts.
    pub fn merge(&mut self, inspection: &Inspection) {
        for c in &inspection.counts {
            self.add(&c.word, c.count);
        }
    }

    pub fn get(&self, word: &str) -> u64 {
        self.index.get(word).map_or(0, |&i| self.entries[i].count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `n` most frequent words, descending; ties keep first-seen order.
    pub fn top_n(&self, n: usize) -> Vec<WordFrequency> {
        let mut ranked = self.entries.clone();
        // `sort_by` is stable.
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(n);
        ranked
    }

    /// All words in first-encountered order.
    pub fn snapshot(&self) -> Vec<WordFrequency> {
        self.entries.clone()
    }
}
