/// Application state management.
///
/// Centralises all state the frontend reads. The scan thread communicates
/// only through its notification channel; state updates happen in
/// `process_scan_messages()`, which is called once per tick.
use crossbeam_channel::Receiver;
use std::path::PathBuf;
use tracing::warn;
use wordwarden_core::scanner::{EngineState, ScanEngine, ScanProgress, ScanSummary};
use wordwarden_core::{FailureKind, ScanError, ScanSettings};

/// The current phase of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPhase {
    /// Idle: no scan in progress, possibly showing previous results.
    Idle,
    /// Scanning: progress and live match list.
    Scanning,
    /// Scan finished or cancelled: results are available.
    Results,
}

/// Maximum notifications drained from the channel per tick.
///
/// Keeps one tick short even if a large backlog has built up.
const MAX_MESSAGES_PER_TICK: usize = 300;

/// Maximum error notices retained for display. Later ones are only counted.
pub const MAX_SCAN_ERRORS: usize = 1_000;

/// A file-level failure as shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorNotice {
    pub kind: FailureKind,
    pub path: Option<PathBuf>,
    pub message: String,
}

pub struct AppState {
    pub engine: ScanEngine,
    pub phase: AppPhase,
    progress_rx: Option<Receiver<ScanProgress>>,

    // ── Live scan ──────────────────────────────────────
    pub total_files: u64,
    pub processed_files: u64,
    pub percent: f64,
    /// Flagged files with their match counts, in walk order.
    pub matches: Vec<(PathBuf, u64)>,
    pub scan_errors: Vec<ErrorNotice>,
    pub scan_error_count: u64,

    // ── Results ────────────────────────────────────────
    pub summary: Option<ScanSummary>,
    /// True if the most recent scan was cancelled (partial results).
    pub scan_was_cancelled: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ScanSettings::default())
    }
}

impl AppState {
    pub fn new(settings: ScanSettings) -> Self {
        Self {
            engine: ScanEngine::new(settings),
            phase: AppPhase::Idle,
            progress_rx: None,
            total_files: 0,
            processed_files: 0,
            percent: 0.0,
            matches: Vec::new(),
            scan_errors: Vec::new(),
            scan_error_count: 0,
            summary: None,
            scan_was_cancelled: false,
        }
    }

    /// Start a scan of `root` for the comma-separated `words`.
    ///
    /// A previous finished session is discarded first. On a configuration
    /// error nothing changes and the phase stays as it was.
    pub fn start_scan(&mut self, root: PathBuf, words: &str) -> Result<(), ScanError> {
        if self.engine.state().is_terminal() {
            self.engine.reset()?;
        }
        self.engine.configure(root, words);
        let rx = self.engine.start()?;

        self.phase = AppPhase::Scanning;
        self.progress_rx = Some(rx);
        self.total_files = 0;
        self.processed_files = 0;
        self.percent = 0.0;
        self.matches.clear();
        self.scan_errors.clear();
        self.scan_error_count = 0;
        self.summary = None;
        self.scan_was_cancelled = false;
        Ok(())
    }

    pub fn pause_scan(&self) {
        self.engine.pause();
    }

    pub fn resume_scan(&self) {
        self.engine.resume();
    }

    pub fn cancel_scan(&self) {
        self.engine.cancel();
    }

    pub fn is_paused(&self) -> bool {
        self.engine.state() == EngineState::Paused
    }

    /// Process pending scan notifications. Returns `true` if anything changed.
    pub fn process_scan_messages(&mut self) -> bool {
        self.process_scan_messages_with(|_| {})
    }

    /// Like [`process_scan_messages`](Self::process_scan_messages), handing
    /// each message to `observer` before it is applied.
    pub fn process_scan_messages_with(&mut self, mut observer: impl FnMut(&ScanProgress)) -> bool {
        let rx = match &self.progress_rx {
            Some(rx) => rx.clone(),
            None => return false,
        };

        let mut changed = false;
        for _ in 0..MAX_MESSAGES_PER_TICK {
            let msg = match rx.try_recv() {
                Ok(m) => m,
                Err(crossbeam_channel::TryRecvError::Empty) => break,
                Err(crossbeam_channel::TryRecvError::Disconnected) => {
                    // The scan thread is gone without a terminal message.
                    warn!("Scan channel closed unexpectedly");
                    self.progress_rx = None;
                    self.phase = AppPhase::Results;
                    return true;
                }
            };
            changed = true;
            observer(&msg);
            if self.apply(msg) {
                return true;
            }
        }
        changed
    }

    /// Apply one message. Returns `true` once the scan has ended.
    fn apply(&mut self, msg: ScanProgress) -> bool {
        match msg {
            ScanProgress::Started { total_files } => {
                self.total_files = total_files;
            }
            ScanProgress::Progress {
                processed_files,
                total_files,
                percent,
            } => {
                self.processed_files = processed_files;
                self.total_files = total_files;
                self.percent = percent;
            }
            ScanProgress::MatchFound { path, match_count } => {
                self.matches.push((path, match_count));
            }
            ScanProgress::Error {
                kind,
                path,
                message,
            } => {
                self.scan_error_count += 1;
                if self.scan_errors.len() < MAX_SCAN_ERRORS {
                    self.scan_errors.push(ErrorNotice {
                        kind,
                        path,
                        message,
                    });
                }
            }
            ScanProgress::Finished(summary) => {
                self.processed_files = summary.processed_files;
                self.total_files = summary.total_files;
                self.percent = 100.0;
                self.summary = Some(summary);
                self.finish();
                return true;
            }
            ScanProgress::Cancelled {
                processed_files,
                total_files,
                ..
            } => {
                self.processed_files = processed_files;
                self.total_files = total_files;
                self.scan_was_cancelled = true;
                self.finish();
                return true;
            }
        }
        false
    }

    fn finish(&mut self) {
        self.phase = AppPhase::Results;
        self.progress_rx = None;
        self.engine.join();
    }
}
