/// Console presenter: turns scan notifications into terminal lines.
///
/// Progress is throttled to fixed percentage steps so a large tree does not
/// flood the terminal; matches, errors and terminal messages always print.
use wordwarden_core::scanner::{ScanProgress, ScanSummary};

/// Format a byte count into a short human-readable string (binary units).
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

pub struct ConsolePresenter {
    /// Print a progress line every this many percent.
    step: u32,
    last_step: Option<u32>,
}

impl Default for ConsolePresenter {
    fn default() -> Self {
        Self::new(10)
    }
}

impl ConsolePresenter {
    pub fn new(step: u32) -> Self {
        Self {
            step: step.clamp(1, 100),
            last_step: None,
        }
    }

    /// Lines to print for one notification (possibly none).
    pub fn render(&mut self, msg: &ScanProgress) -> Vec<String> {
        match msg {
            ScanProgress::Started { total_files } => {
                self.last_step = None;
                vec![format!("Scanning {total_files} files...")]
            }
            ScanProgress::Progress {
                processed_files,
                total_files,
                percent,
            } => {
                let bucket = (*percent as u32 / self.step) * self.step;
                if self.last_step == Some(bucket) {
                    return Vec::new();
                }
                self.last_step = Some(bucket);
                vec![format!(
                    "Progress: {bucket:>3}% ({processed_files}/{total_files})"
                )]
            }
            ScanProgress::MatchFound { path, match_count } => vec![format!(
                "Forbidden words found in {}, replacements: {match_count}",
                path.display()
            )],
            ScanProgress::Error {
                kind,
                path,
                message,
            } => {
                let line = match path {
                    Some(p) => format!("[{}] {}: {message}", kind.label(), p.display()),
                    None => format!("[{}] {message}", kind.label()),
                };
                vec![line]
            }
            ScanProgress::Finished(summary) => render_summary(summary),
            ScanProgress::Cancelled {
                processed_files,
                total_files,
                flagged_files,
            } => vec![format!(
                "Scan stopped after {processed_files} of {total_files} files \
                 ({flagged_files} flagged). No report was written."
            )],
        }
    }
}

fn render_summary(summary: &ScanSummary) -> Vec<String> {
    let flagged_bytes: u64 = summary.entries.iter().map(|e| e.file_size).sum();
    let mut lines = vec![format!(
        "Scan finished in {:.2?}: {} files, {} flagged ({}), {} skipped.",
        summary.duration,
        summary.processed_files,
        summary.flagged_files(),
        format_size(flagged_bytes),
        summary.skipped_files
    )];
    for (rank, w) in summary.top_words.iter().enumerate() {
        lines.push(format!("  {:>2}. {} ({})", rank + 1, w.word, w.count));
    }
    match &summary.report_path {
        Some(p) => lines.push(format!("Report written to {}", p.display())),
        None => lines.push("Report could not be written.".to_string()),
    }
    lines
}
