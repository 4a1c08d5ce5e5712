/// Scan notifications: lightweight messages sent from the scan thread to
/// the caller via a crossbeam channel, plus the commands a caller may issue.
use crate::analysis::WordFrequency;
use crate::error::FailureKind;
use crate::model::ReportEntry;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Control commands a frontend can map its input onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanCommand {
    Pause,
    Resume,
    Cancel,
}

impl ScanCommand {
    /// Parse a user-typed command (`p`/`pause`, `r`/`resume`, `c`/`cancel`/`stop`).
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "p" | "pause" => Some(Self::Pause),
            "r" | "resume" => Some(Self::Resume),
            "c" | "cancel" | "s" | "stop" | "q" => Some(Self::Cancel),
            _ => None,
        }
    }
}

/// Notifications streamed from the scan thread, strictly in emission order.
#[derive(Debug, Clone)]
pub enum ScanProgress {
    /// Enumeration finished; `total_files` files will be visited.
    Started { total_files: u64 },
    /// One more file has been visited (matched, clean or skipped).
    Progress {
        processed_files: u64,
        total_files: u64,
        /// 0.0 to 100.0.
        percent: f64,
    },
    /// A file contained forbidden words and has been quarantined.
    MatchFound {
        path: PathBuf,
        match_count: u64,
    },
    /// A non-fatal failure. The scan continues.
    Error {
        kind: FailureKind,
        path: Option<PathBuf>,
        message: String,
    },
    /// Every file was visited. Carries the final immutable results.
    Finished(ScanSummary),
    /// Scan stopped on request; no report was written.
    Cancelled {
        processed_files: u64,
        total_files: u64,
        flagged_files: u64,
    },
}

impl ScanProgress {
    /// `true` for the last message a scan ever sends.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished(_) | Self::Cancelled { .. })
    }
}

/// Snapshot of a completed scan session.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanSummary {
    /// Flagged files in walk order.
    pub entries: Vec<ReportEntry>,
    /// Every matched word in first-encountered order.
    pub frequencies: Vec<WordFrequency>,
    /// The ranking written to the report.
    pub top_words: Vec<WordFrequency>,
    pub processed_files: u64,
    pub total_files: u64,
    /// Files that could not be read, quarantined or redacted.
    pub skipped_files: u64,
    pub duration: Duration,
    /// `None` when the report file could not be written.
    pub report_path: Option<PathBuf>,
}

impl ScanSummary {
    pub fn flagged_files(&self) -> u64 {
        self.entries.len() as u64
    }

    pub fn frequency_of(&self, word: &str) -> u64 {
        self.frequencies
            .iter()
            .find(|w| w.word == word)
            .map_or(0, |w| w.count)
    }
}

/// Percentage of `processed` over `total`; an empty walk counts as done.
pub fn percent_complete(processed: u64, total: u64) -> f64 {
    if total == 0 {
        return 100.0;
    }
    processed as f64 / total as f64 * 100.0
}
