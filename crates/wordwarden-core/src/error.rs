/// Error taxonomy for the scan engine.
///
/// Only [`ScanError::Configuration`] (and its siblings raised by `start()`)
/// stop a scan from beginning. File-level `Read`/`Write` failures are
/// reported and skipped; `ReportWrite` only affects finalisation.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write report {}: {source}", path.display())]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("a scan has already been started on this engine")]
    AlreadyStarted,

    #[error("invalid settings file {}: {message}", path.display())]
    Settings {
        path: PathBuf,
        message: String,
    },
}

/// Coarse failure category carried by error notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum FailureKind {
    Configuration,
    Read,
    Write,
    ReportWrite,
}

impl FailureKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Read => "read",
            Self::Write => "write",
            Self::ReportWrite => "report",
        }
    }
}

impl ScanError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Configuration(_) | Self::AlreadyStarted | Self::Settings { .. } => {
                FailureKind::Configuration
            }
            Self::Read { .. } => FailureKind::Read,
            Self::Write { .. } => FailureKind::Write,
            Self::ReportWrite { .. } => FailureKind::ReportWrite,
        }
    }

    /// The file the failure relates to, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Read { path, .. }
            | Self::Write { path, .. }
            | Self::ReportWrite { path, .. }
            | Self::Settings { path, .. } => Some(path),
            Self::Configuration(_) | Self::AlreadyStarted => None,
        }
    }
}
