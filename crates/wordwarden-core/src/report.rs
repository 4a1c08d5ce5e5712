/// Plain-text report of flagged files and the word-frequency ranking.
///
/// Layout:
///
/// ```text
/// Report of files containing forbidden words:
/// -------------------------------------------------
/// File: <path>
/// Replacements: <count>
/// File size: <bytes> bytes
///
/// Top 10 most frequent forbidden words:
/// -------------------------------------------------
/// Word: <word>, Occurrences: <count>
/// ```
use crate::analysis::WordFrequency;
use crate::error::ScanError;
use crate::model::ReportEntry;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const RULE: &str = "-------------------------------------------------";

/// Write the report body to any sink.
pub fn write_report<W: Write>(
    out: &mut W,
    entries: &[ReportEntry],
    top_words: &[WordFrequency],
    top_n: usize,
) -> io::Result<()> {
    writeln!(out, "Report of files containing forbidden words:")?;
    writeln!(out, "{RULE}")?;
    for entry in entries {
        writeln!(out, "File: {}", entry.file_path.display())?;
        writeln!(out, "Replacements: {}", entry.word_count)?;
        writeln!(out, "File size: {} bytes", entry.file_size)?;
        writeln!(out)?;
    }

    writeln!(out, "Top {top_n} most frequent forbidden words:")?;
    writeln!(out, "{RULE}")?;
    for w in top_words.iter().take(top_n) {
        writeln!(out, "Word: {}, Occurrences: {}", w.word, w.count)?;
    }
    Ok(())
}

/// Render the report into a `String`.
pub fn render_report(entries: &[ReportEntry], top_words: &[WordFrequency], top_n: usize) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_report(&mut buf, entries, top_words, top_n);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Create (or truncate) `report_path` and write the report as UTF-8.
pub fn build(
    report_path: &Path,
    entries: &[ReportEntry],
    top_words: &[WordFrequency],
    top_n: usize,
) -> Result<(), ScanError> {
    let to_err = |source: io::Error| ScanError::ReportWrite {
        path: report_path.to_path_buf(),
        source,
    };
    let file = File::create(report_path).map_err(to_err)?;
    let mut out = BufWriter::new(file);
    write_report(&mut out, entries, top_words, top_n).map_err(to_err)?;
    out.flush().map_err(to_err)?;
    Ok(())
}
