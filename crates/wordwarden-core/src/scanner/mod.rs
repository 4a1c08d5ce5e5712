/// Scanner module: the forbidden-word scan engine.
///
/// A scan runs on one dedicated background thread and visits files strictly
/// one at a time, so report order and progress order both follow the walk.
/// The caller talks to the running scan through two narrow paths:
///
/// - **down:** pause, resume and cancel flags in a shared [`ScanControl`];
/// - **up:** [`ScanProgress`] messages on a bounded crossbeam channel.
///
/// Session data (entries, frequencies) never leaves the scan thread except
/// as snapshots inside those messages.
pub mod control;
pub mod progress;
pub mod session;
pub mod walk;

pub use control::{EngineState, ScanControl};
pub use progress::{ScanCommand, ScanProgress, ScanSummary};

use crate::error::ScanError;
use crate::model::{ForbiddenWordSet, ScanConfiguration};
use crate::settings::ScanSettings;
use crossbeam_channel::Receiver;
use std::any::Any;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use tracing::{info, warn};

/// Maximum number of progress messages that may queue up in the channel.
///
/// If the caller stops draining, the scan thread blocks on `send` instead of
/// growing the queue without bound.
pub const PROGRESS_CHANNEL_CAPACITY: usize = 4_096;

/// Configures, starts and controls one scan session at a time.
pub struct ScanEngine {
    settings: ScanSettings,
    root_folder: Option<PathBuf>,
    forbidden_words: ForbiddenWordSet,
    control: Arc<ScanControl>,
    worker: Option<thread::JoinHandle<()>>,
}

impl Default for ScanEngine {
    fn default() -> Self {
        Self::new(ScanSettings::default())
    }
}

impl ScanEngine {
    pub fn new(settings: ScanSettings) -> Self {
        Self {
            settings,
            root_folder: None,
            forbidden_words: ForbiddenWordSet::default(),
            control: Arc::new(ScanControl::new()),
            worker: None,
        }
    }

    /// Select the root folder and parse the comma-separated word list.
    ///
    /// Takes effect on the next `start()`; a running scan keeps its own copy.
    pub fn configure(&mut self, root_folder: impl Into<PathBuf>, forbidden_words_raw: &str) {
        self.root_folder = Some(root_folder.into());
        self.forbidden_words = ForbiddenWordSet::parse(forbidden_words_raw);
    }

    pub fn state(&self) -> EngineState {
        self.control.state()
    }

    /// Validate the configuration and launch the scan thread.
    ///
    /// Only valid from `Idle`. On any error the engine stays `Idle`.
    /// Returns the receiving end of the notification channel.
    pub fn start(&mut self) -> Result<Receiver<ScanProgress>, ScanError> {
        if self.control.state() != EngineState::Idle {
            return Err(ScanError::AlreadyStarted);
        }
        let config = self.validated_config()?;

        std::fs::create_dir_all(&config.destination_folder).map_err(|source| {
            ScanError::Write {
                path: config.destination_folder.clone(),
                source,
            }
        })?;

        let (progress_tx, progress_rx) =
            crossbeam_channel::bounded::<ScanProgress>(PROGRESS_CHANNEL_CAPACITY);
        let control = self.control.clone();
        let settings = self.settings.clone();

        info!(
            "Starting scan of {} for {} forbidden words",
            config.root_folder.display(),
            config.forbidden_words.len()
        );
        control.set_state(EngineState::Running);

        let spawned = thread::Builder::new()
            .name("wordwarden-scanner".into())
            .spawn({
                let control = control.clone();
                move || session::run_scan(config, settings, control, progress_tx)
            });
        match spawned {
            Ok(handle) => {
                self.worker = Some(handle);
                Ok(progress_rx)
            }
            Err(e) => {
                control.set_state(EngineState::Idle);
                Err(ScanError::Configuration(format!(
                    "cannot spawn scanner thread: {e}"
                )))
            }
        }
    }

    fn validated_config(&self) -> Result<ScanConfiguration, ScanError> {
        let root = self
            .root_folder
            .as_deref()
            .ok_or_else(|| ScanError::Configuration("no root folder selected".into()))?;
        if self.forbidden_words.is_empty() {
            return Err(ScanError::Configuration("no forbidden words given".into()));
        }
        if !root.is_dir() {
            return Err(ScanError::Configuration(format!(
                "root folder {} is not a directory",
                root.display()
            )));
        }
        self.settings
            .validate()
            .map_err(ScanError::Configuration)?;
        Ok(ScanConfiguration::new(
            root,
            self.forbidden_words.clone(),
            &self.settings,
        ))
    }

    /// Hold the scan at the next file boundary.
    pub fn pause(&self) {
        if self.state().is_active() {
            info!("Scan paused");
            self.control.pause();
        }
    }

    pub fn resume(&self) {
        if self.control.is_paused() {
            info!("Scan resumed");
        }
        self.control.resume();
    }

    /// Request cancellation; observed at the next file boundary.
    pub fn cancel(&self) {
        if self.state().is_active() {
            info!("Scan cancellation requested");
            self.control.cancel();
        }
    }

    pub fn apply(&self, command: ScanCommand) {
        match command {
            ScanCommand::Pause => self.pause(),
            ScanCommand::Resume => self.resume(),
            ScanCommand::Cancel => self.cancel(),
        }
    }

    /// Wait for the scan thread to exit.
    pub fn join(&mut self) {
        if let Some(handle) = self.worker.take() {
            if let Err(panic) = handle.join() {
                warn!("Scan thread panicked: {}", panic_reason(panic.as_ref()));
            }
        }
    }

    /// Discard a finished session and return to `Idle`.
    ///
    /// Fails with `AlreadyStarted` while a scan is still running.
    pub fn reset(&mut self) -> Result<(), ScanError> {
        if self.state().is_active() {
            return Err(ScanError::AlreadyStarted);
        }
        self.join();
        self.control = Arc::new(ScanControl::new());
        Ok(())
    }
}

/// Best-effort text of a thread panic payload.
fn panic_reason(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string())
}

impl Drop for ScanEngine {
    fn drop(&mut self) {
        // A dropped engine must not leave its scan thread parked on the pause gate.
        self.control.cancel();
    }
}
