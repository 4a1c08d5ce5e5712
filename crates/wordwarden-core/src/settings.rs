/// Scan settings: the fixed names and limits used by the engine.
///
/// Defaults reproduce the classic layout (`ForbiddenWordsFiles/`,
/// `Modified_<name>`, `ForbiddenWordsReport.txt`, top 10). A TOML file may
/// override any subset of keys; missing keys fall back to the defaults.
use crate::error::ScanError;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path};
use std::time::Duration;

/// Name of the quarantine subfolder created under the scan root.
pub const DEFAULT_QUARANTINE_DIR: &str = "ForbiddenWordsFiles";
/// Prefix of the redacted copy written beside each flagged file.
pub const DEFAULT_REDACTED_PREFIX: &str = "Modified_";
/// Report file written under the scan root on completion.
pub const DEFAULT_REPORT_FILE: &str = "ForbiddenWordsReport.txt";
/// Number of words listed in the frequency ranking.
pub const DEFAULT_TOP_WORDS: usize = 10;

/// `true` when `name` is exactly one normal path component (no `.`, `..`,
/// separators or roots).
fn is_plain_name(name: &str) -> bool {
    if name.contains('/') || name.contains('\\') {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    pub quarantine_dir: String,
    pub redacted_prefix: String,
    pub report_file: String,
    pub mask_char: char,
    pub top_words: usize,
    /// Skip the quarantine folder and the report file during the walk.
    pub skip_artifacts: bool,
    /// Upper bound on a single pause-gate wait before re-checking the flags.
    pub pause_check_ms: u64,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            quarantine_dir: DEFAULT_QUARANTINE_DIR.to_string(),
            redacted_prefix: DEFAULT_REDACTED_PREFIX.to_string(),
            report_file: DEFAULT_REPORT_FILE.to_string(),
            mask_char: '*',
            top_words: DEFAULT_TOP_WORDS,
            skip_artifacts: true,
            pause_check_ms: 250,
        }
    }
}

impl ScanSettings {
    /// Parse settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load settings from a TOML file on disk.
    pub fn load(path: &Path) -> Result<Self, ScanError> {
        let text = std::fs::read_to_string(path).map_err(|e| ScanError::Settings {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let settings = Self::from_toml_str(&text).map_err(|e| ScanError::Settings {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        settings.validate().map_err(|message| ScanError::Settings {
            path: path.to_path_buf(),
            message,
        })?;
        Ok(settings)
    }

    /// Reject values that would make the engine write outside its folders.
    pub fn validate(&self) -> Result<(), String> {
        for (key, name) in [
            ("quarantine_dir", &self.quarantine_dir),
            ("report_file", &self.report_file),
            ("redacted_prefix", &self.redacted_prefix),
        ] {
            if name.trim().is_empty() {
                return Err(format!("{key} must not be empty"));
            }
            if !is_plain_name(name) {
                return Err(format!("{key} '{name}' must be a plain name, not a path"));
            }
        }
        Ok(())
    }

    pub fn pause_check_interval(&self) -> Duration {
        Duration::from_millis(self.pause_check_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_layout() {
        let s = ScanSettings::default();
        assert_eq!(s.quarantine_dir, "ForbiddenWordsFiles");
        assert_eq!(s.redacted_prefix, "Modified_");
        assert_eq!(s.report_file, "ForbiddenWordsReport.txt");
        assert_eq!(s.mask_char, '*');
        assert_eq!(s.top_words, 10);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let s = ScanSettings::from_toml_str("mask_char = '#'\ntop_words = 3\n").unwrap();
        assert_eq!(s.mask_char, '#');
        assert_eq!(s.top_words, 3);
        assert_eq!(s.quarantine_dir, DEFAULT_QUARANTINE_DIR);
    }

    #[test]
    fn path_like_names_are_rejected() {
        for bad in ["../elsewhere", "..", ".", "a/b", "a\\b", "/abs"] {
            let s = ScanSettings {
                quarantine_dir: bad.into(),
                ..ScanSettings::default()
            };
            assert!(s.validate().is_err(), "quarantine_dir {bad:?} accepted");

            let s = ScanSettings {
                report_file: bad.into(),
                ..ScanSettings::default()
            };
            assert!(s.validate().is_err(), "report_file {bad:?} accepted");

            let s = ScanSettings {
                redacted_prefix: bad.into(),
                ..ScanSettings::default()
            };
            assert!(s.validate().is_err(), "redacted_prefix {bad:?} accepted");
        }
    }

    #[test]
    fn plain_names_are_accepted() {
        assert!(is_plain_name("held"));
        assert!(is_plain_name("report.txt"));
        assert!(is_plain_name("clean_"));
        assert!(!is_plain_name(".."));
        assert!(!is_plain_name("."));
    }

    #[test]
    fn load_reports_parse_failures() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("wordwarden.toml");
        std::fs::write(&path, "top_words = \"many\"").unwrap();
        let err = ScanSettings::load(&path).unwrap_err();
        assert!(matches!(err, ScanError::Settings { .. }));
    }
}
