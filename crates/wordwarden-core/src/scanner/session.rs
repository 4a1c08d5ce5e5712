/// The scan worker: one sequential pass over the enumerated files.
///
/// Owns the per-session results (report entries, frequency tracker and
/// counters). Nothing here is shared with the caller; results leave the
/// thread only as immutable snapshots inside `ScanProgress` messages.
use crate::analysis::WordFrequencyTracker;
use crate::error::ScanError;
use crate::inspector;
use crate::model::{ReportEntry, ScanConfiguration};
use crate::quarantine;
use crate::report;
use crate::scanner::control::{EngineState, ScanControl};
use crate::scanner::progress::{percent_complete, ScanProgress, ScanSummary};
use crate::scanner::walk;
use crate::settings::ScanSettings;
use crossbeam_channel::Sender;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Mutable state of one scan, owned by the scan thread.
#[derive(Debug, Default)]
pub struct ScanSession {
    pub entries: Vec<ReportEntry>,
    pub frequencies: WordFrequencyTracker,
    pub processed_files: u64,
    pub total_files: u64,
    pub skipped_files: u64,
}

impl ScanSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect one file and, if it matches, quarantine it and record it.
    ///
    /// Returns the new entry for a flagged file, `None` for a clean one.
    /// On error nothing is recorded for the file.
    pub fn process_file(
        &mut self,
        path: &Path,
        config: &ScanConfiguration,
        settings: &ScanSettings,
    ) -> Result<Option<ReportEntry>, ScanError> {
        let inspection = inspector::inspect(path, &config.forbidden_words)?;
        if !inspection.matched() {
            return Ok(None);
        }

        let file_size = std::fs::metadata(path)
            .map_err(|source| ScanError::Read {
                path: path.to_path_buf(),
                source,
            })?
            .len();

        quarantine::quarantine(
            path,
            &config.destination_folder,
            &config.forbidden_words,
            settings,
        )?;

        let entry = ReportEntry {
            file_path: path.to_path_buf(),
            word_count: inspection.total(),
            file_size,
        };
        self.frequencies.merge(&inspection);
        self.entries.push(entry.clone());
        Ok(Some(entry))
    }

    /// Immutable snapshot of the session for the `Finished` message.
    pub fn summary(&self, settings: &ScanSettings, started: Instant) -> ScanSummary {
        ScanSummary {
            entries: self.entries.clone(),
            frequencies: self.frequencies.snapshot(),
            top_words: self.frequencies.top_n(settings.top_words),
            processed_files: self.processed_files,
            total_files: self.total_files,
            skipped_files: self.skipped_files,
            duration: started.elapsed(),
            report_path: None,
        }
    }
}

fn send_cancelled(
    session: &ScanSession,
    control: &ScanControl,
    progress_tx: &Sender<ScanProgress>,
) {
    info!(
        "Scan cancelled after {}/{} files",
        session.processed_files, session.total_files
    );
    control.set_state(EngineState::Cancelled);
    let _ = progress_tx.send(ScanProgress::Cancelled {
        processed_files: session.processed_files,
        total_files: session.total_files,
        flagged_files: session.entries.len() as u64,
    });
}

/// Run a full scan. Called on the dedicated scan thread.
pub fn run_scan(
    config: ScanConfiguration,
    settings: ScanSettings,
    control: Arc<ScanControl>,
    progress_tx: Sender<ScanProgress>,
) {
    let start = Instant::now();
    let mut session = ScanSession::new();

    let files = match walk::enumerate_files(&config, &settings, &control, &progress_tx) {
        Some(files) => files,
        None => {
            send_cancelled(&session, &control, &progress_tx);
            return;
        }
    };
    session.total_files = files.len() as u64;
    let _ = progress_tx.send(ScanProgress::Started {
        total_files: session.total_files,
    });

    for path in &files {
        // Check points: cancel first, then the pause gate.
        if control.is_cancelled() || !control.wait_while_paused(settings.pause_check_interval()) {
            send_cancelled(&session, &control, &progress_tx);
            return;
        }

        match session.process_file(path, &config, &settings) {
            Ok(Some(entry)) => {
                debug!("Flagged {} ({} matches)", path.display(), entry.word_count);
                let _ = progress_tx.send(ScanProgress::MatchFound {
                    path: entry.file_path,
                    match_count: entry.word_count,
                });
            }
            Ok(None) => {}
            Err(err) => {
                session.skipped_files += 1;
                warn!("Skipping {}: {err}", path.display());
                let _ = progress_tx.send(ScanProgress::Error {
                    kind: err.kind(),
                    path: Some(path.clone()),
                    message: err.to_string(),
                });
            }
        }

        session.processed_files += 1;
        let _ = progress_tx.send(ScanProgress::Progress {
            processed_files: session.processed_files,
            total_files: session.total_files,
            percent: percent_complete(session.processed_files, session.total_files),
        });
    }

    let mut summary = session.summary(&settings, start);
    match report::build(
        &config.report_path,
        &summary.entries,
        &summary.top_words,
        settings.top_words,
    ) {
        Ok(()) => summary.report_path = Some(config.report_path.clone()),
        Err(err) => {
            warn!("Report not written: {err}");
            let _ = progress_tx.send(ScanProgress::Error {
                kind: err.kind(),
                path: Some(config.report_path.clone()),
                message: err.to_string(),
            });
        }
    }
    summary.duration = start.elapsed();

    info!(
        "Scan finished: {} files, {} flagged, {} skipped in {:?}",
        summary.processed_files,
        summary.flagged_files(),
        summary.skipped_files,
        summary.duration
    );
    control.set_state(EngineState::Completed);
    let _ = progress_tx.send(ScanProgress::Finished(summary));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ForbiddenWordSet;
    use std::fs;

    #[test]
    fn process_file_records_only_matches() {
        let tmp = tempfile::TempDir::new().unwrap();
        let root = tmp.path();
        let settings = ScanSettings::default();
        let config = ScanConfiguration::new(root, ForbiddenWordSet::parse("the,dog"), &settings);
        fs::create_dir_all(&config.destination_folder).unwrap();
        fs::write(root.join("a.txt"), "the quick brown fox").unwrap();
        fs::write(root.join("c.txt"), "nothing to see").unwrap();

        let mut session = ScanSession::new();
        let entry = session
            .process_file(&root.join("a.txt"), &config, &settings)
            .unwrap()
            .unwrap();
        assert_eq!(entry.word_count, 1);
        assert_eq!(entry.file_size, 19);
        assert!(session
            .process_file(&root.join("c.txt"), &config, &settings)
            .unwrap()
            .is_none());
        assert_eq!(session.entries.len(), 1);
        assert_eq!(session.frequencies.get("the"), 1);
    }

    #[test]
    fn failed_quarantine_records_nothing() {
        let tmp = tempfile::TempDir::new().unwrap();
        let root = tmp.path();
        let settings = ScanSettings::default();
        // Destination folder deliberately not created.
        let config = ScanConfiguration::new(root, ForbiddenWordSet::parse("bad"), &settings);
        fs::write(root.join("a.txt"), "bad").unwrap();

        let mut session = ScanSession::new();
        let err = session
            .process_file(&root.join("a.txt"), &config, &settings)
            .unwrap_err();
        assert!(matches!(err, ScanError::Write { .. }));
        assert!(session.entries.is_empty());
        assert!(session.frequencies.is_empty());
    }
}
