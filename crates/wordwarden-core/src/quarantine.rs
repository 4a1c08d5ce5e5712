/// Quarantine and redaction side effects for a flagged file.
///
/// Two artifacts per file:
/// - an unmodified copy in the quarantine folder (same file name, later
///   copies of the same name overwrite earlier ones);
/// - a redacted copy beside the original, named `<prefix><file name>`, with
///   every forbidden word replaced by a mask run of the same length.
///
/// Nothing is rolled back on failure.
use crate::error::ScanError;
use crate::model::ForbiddenWordSet;
use crate::settings::ScanSettings;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the two artifacts of one flagged file ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quarantined {
    pub copy_path: PathBuf,
    pub redacted_path: PathBuf,
}

/// Replace every occurrence of every word, in list order, with a run of
/// `mask` as long as the word (in characters).
///
/// Earlier replacements can hide later words that overlap them.
pub fn redact_text(text: &str, words: &ForbiddenWordSet, mask: char) -> String {
    let mut out = text.to_owned();
    for word in words.iter() {
        let replacement: String = std::iter::repeat(mask).take(word.chars().count()).collect();
        out = out.replace(word, &replacement);
    }
    out
}

/// Path of the redacted sibling of `file_path`.
pub fn redacted_path_for(file_path: &Path, prefix: &str) -> PathBuf {
    let name = file_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir = file_path.parent().unwrap_or_else(|| Path::new(""));
    dir.join(format!("{prefix}{name}"))
}

/// Copy `file_path` into `destination_folder` and write its redacted sibling.
pub fn quarantine(
    file_path: &Path,
    destination_folder: &Path,
    words: &ForbiddenWordSet,
    settings: &ScanSettings,
) -> Result<Quarantined, ScanError> {
    let file_name = file_path.file_name().ok_or_else(|| ScanError::Write {
        path: file_path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
    })?;
    let copy_path = destination_folder.join(file_name);

    // A file already living in the quarantine folder is its own copy;
    // copying it onto itself would truncate it.
    if file_path.parent() != Some(destination_folder) {
        fs::copy(file_path, &copy_path).map_err(|source| ScanError::Write {
            path: copy_path.clone(),
            source,
        })?;
    }

    let text = fs::read_to_string(file_path).map_err(|source| ScanError::Read {
        path: file_path.to_path_buf(),
        source,
    })?;
    let redacted = redact_text(&text, words, settings.mask_char);
    let redacted_path = redacted_path_for(file_path, &settings.redacted_prefix);
    fs::write(&redacted_path, redacted).map_err(|source| ScanError::Write {
        path: redacted_path.clone(),
        source,
    })?;

    debug!(
        "Quarantined {} -> {} (redacted: {})",
        file_path.display(),
        copy_path.display(),
        redacted_path.display()
    );

    Ok(Quarantined {
        copy_path,
        redacted_path,
    })
}
