/// WordWarden Core: forbidden-word scanning, quarantine, redaction and reporting.
///
/// This crate contains all business logic with zero UI dependencies.
/// Frontends drive a [`scanner::ScanEngine`] and consume the
/// [`scanner::progress::ScanProgress`] notifications it streams back.
///
/// # Modules
///
/// - [`model`]: Forbidden-word set, scan configuration and report entries.
/// - [`inspector`]: Per-file forbidden-word detection and counting.
/// - [`quarantine`]: Evidence copy plus redacted sibling file.
/// - [`analysis`]: Global word-frequency tracking and ranking.
/// - [`report`]: Plain-text report rendering.
/// - [`scanner`]: Background scan engine with pause, resume and cancel.
/// - [`settings`]: Tunable names and limits, loadable from TOML.
pub mod analysis;
pub mod error;
pub mod inspector;
pub mod model;
pub mod quarantine;
pub mod report;
pub mod scanner;
pub mod settings;

pub use error::{FailureKind, ScanError};
pub use settings::ScanSettings;
