/// Up-front file enumeration using `jwalk` in serial, sorted mode.
///
/// The full list is collected before any file is inspected so progress can
/// be reported as a fraction of a known total. Order is depth-first with
/// siblings sorted by name, which keeps report order reproducible.
use crate::error::FailureKind;
use crate::model::ScanConfiguration;
use crate::scanner::control::ScanControl;
use crate::scanner::progress::ScanProgress;
use crate::settings::ScanSettings;
use crossbeam_channel::Sender;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// `true` for paths the engine itself produces under the scan root.
fn is_artifact(path: &Path, config: &ScanConfiguration) -> bool {
    path.starts_with(&config.destination_folder) || path == config.report_path
}

/// Collect every regular file under the root.
///
/// Directory read failures are reported as `Read` errors and skipped.
/// Returns `None` if cancellation is requested while walking.
pub fn enumerate_files(
    config: &ScanConfiguration,
    settings: &ScanSettings,
    control: &ScanControl,
    progress_tx: &Sender<ScanProgress>,
) -> Option<Vec<PathBuf>> {
    let walker = jwalk::WalkDir::new(&config.root_folder)
        .skip_hidden(false)
        .follow_links(false)
        .sort(true)
        .parallelism(jwalk::Parallelism::Serial);

    let mut files = Vec::new();
    for entry_result in walker {
        if control.is_cancelled() {
            return None;
        }

        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                let path = err.path().map(Path::to_path_buf);
                warn!("Cannot enumerate {:?}: {err}", path);
                let _ = progress_tx.send(ScanProgress::Error {
                    kind: FailureKind::Read,
                    path,
                    message: err.to_string(),
                });
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if settings.skip_artifacts && is_artifact(&path, config) {
            continue;
        }
        files.push(path);
    }

    debug!(
        "Enumerated {} files under {}",
        files.len(),
        config.root_folder.display()
    );
    Some(files)
}
