/// One flagged file in walk order.
use serde::Serialize;
use std::path::PathBuf;

/// Created once per flagged file and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub file_path: PathBuf,
    /// Total forbidden-word occurrences in the file (always >= 1).
    pub word_count: u64,
    /// Size of the original file in bytes.
    pub file_size: u64,
}
