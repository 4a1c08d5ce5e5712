/// Per-scan configuration, fixed for the lifetime of one session.
use crate::model::ForbiddenWordSet;
use crate::settings::ScanSettings;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ScanConfiguration {
    pub root_folder: PathBuf,
    pub forbidden_words: ForbiddenWordSet,
    /// `root_folder` joined with the quarantine folder name.
    pub destination_folder: PathBuf,
    /// `root_folder` joined with the report file name.
    pub report_path: PathBuf,
}

impl ScanConfiguration {
    pub fn new(
        root_folder: &Path,
        forbidden_words: ForbiddenWordSet,
        settings: &ScanSettings,
    ) -> Self {
        Self {
            root_folder: root_folder.to_path_buf(),
            forbidden_words,
            destination_folder: root_folder.join(&settings.quarantine_dir),
            report_path: root_folder.join(&settings.report_file),
        }
    }
}
