/// Data model for a scan session.
///
/// Re-exports the forbidden-word set, the per-scan configuration and the
/// report entry record.
pub mod config;
pub mod report_entry;
pub mod word_set;

pub use config::ScanConfiguration;
pub use report_entry::ReportEntry;
pub use word_set::ForbiddenWordSet;
