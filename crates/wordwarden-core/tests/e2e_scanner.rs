use crossbeam_channel::Receiver;
/// End-to-end scan engine tests.
///
/// These run the real engine (scan thread, jwalk enumeration, quarantine,
/// redaction, report writing) against temporary directories and observe it
/// only through its notification channel and the files it leaves on disk.
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wordwarden_core::inspector::inspect;
use wordwarden_core::model::ForbiddenWordSet;
use wordwarden_core::scanner::{EngineState, ScanEngine, ScanProgress, ScanSummary};
use wordwarden_core::{FailureKind, ScanError, ScanSettings};

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Collect every message up to and including the terminal one.
///
/// Waits up to 30 seconds so a stuck scan fails the test instead of hanging.
fn drain(rx: &Receiver<ScanProgress>) -> Vec<ScanProgress> {
    let deadline = Instant::now() + Duration::from_secs(30);
    let mut out = Vec::new();
    loop {
        let left = deadline.saturating_duration_since(Instant::now());
        assert!(!left.is_zero(), "scan did not finish within 30 seconds");
        match rx.recv_timeout(left) {
            Ok(msg) => {
                let done = msg.is_terminal();
                out.push(msg);
                if done {
                    return out;
                }
            }
            Err(e) => panic!("channel closed before a terminal message: {e}"),
        }
    }
}

fn finished(messages: &[ScanProgress]) -> &ScanSummary {
    match messages.last() {
        Some(ScanProgress::Finished(summary)) => summary,
        other => panic!("expected Finished, got {other:?}"),
    }
}

fn run_to_end(root: &Path, words: &str) -> Vec<ScanProgress> {
    let mut engine = ScanEngine::default();
    engine.configure(root, words);
    let rx = engine.start().expect("scan should start");
    let messages = drain(&rx);
    engine.join();
    messages
}

/// `a.txt` = "the quick brown fox", `b.txt` = "the lazy dog".
fn build_fox_tree(root: &Path) {
    fs::write(root.join("a.txt"), "the quick brown fox").unwrap();
    fs::write(root.join("b.txt"), "the lazy dog").unwrap();
}

fn build_wide_tree(root: &Path, n: usize) {
    for i in 0..n {
        let body = if i % 3 == 0 { "secret plan" } else { "harmless text" };
        fs::write(root.join(format!("file{i:04}.txt")), body).unwrap();
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Two files, two words: both flagged with the expected counts and ranking.
#[test]
fn fox_and_dog_scenario() {
    let tmp = TempDir::new().unwrap();
    build_fox_tree(tmp.path());

    let messages = run_to_end(tmp.path(), "the,dog");
    let summary = finished(&messages);

    assert_eq!(summary.total_files, 2);
    assert_eq!(summary.processed_files, 2);
    assert_eq!(summary.entries.len(), 2);
    assert_eq!(summary.entries[0].file_path, tmp.path().join("a.txt"));
    assert_eq!(summary.entries[0].word_count, 1);
    assert_eq!(summary.entries[1].file_path, tmp.path().join("b.txt"));
    assert_eq!(summary.entries[1].word_count, 2);
    assert_eq!(summary.frequency_of("the"), 2);
    assert_eq!(summary.frequency_of("dog"), 1);
    assert_eq!(summary.top_words[0].word, "the");
    assert_eq!(summary.top_words[1].word, "dog");

    let report_path = tmp.path().join("ForbiddenWordsReport.txt");
    assert_eq!(summary.report_path.as_deref(), Some(report_path.as_path()));
    let report = fs::read_to_string(&report_path).unwrap();
    let the_pos = report.find("Word: the, Occurrences: 2").expect("the ranked");
    let dog_pos = report.find("Word: dog, Occurrences: 1").expect("dog ranked");
    assert!(the_pos < dog_pos);
    assert!(report.contains("Replacements: 2"));
    assert!(report.contains("File size: 12 bytes"));

    // Quarantine copies are byte-identical, redacted files sit beside originals.
    let q = tmp.path().join("ForbiddenWordsFiles");
    assert_eq!(fs::read_to_string(q.join("a.txt")).unwrap(), "the quick brown fox");
    assert_eq!(fs::read_to_string(q.join("b.txt")).unwrap(), "the lazy dog");
    assert_eq!(
        fs::read_to_string(tmp.path().join("Modified_a.txt")).unwrap(),
        "*** quick brown fox"
    );
    assert_eq!(
        fs::read_to_string(tmp.path().join("Modified_b.txt")).unwrap(),
        "*** lazy ***"
    );
}

/// Notifications arrive in walk order and progress ends at 100 %.
#[test]
fn notifications_follow_walk_order() {
    let tmp = TempDir::new().unwrap();
    build_fox_tree(tmp.path());
    fs::write(tmp.path().join("c.txt"), "clean").unwrap();

    let messages = run_to_end(tmp.path(), "the");

    assert!(matches!(messages[0], ScanProgress::Started { total_files: 3 }));
    let matches: Vec<_> = messages
        .iter()
        .filter_map(|m| match m {
            ScanProgress::MatchFound { path, match_count } => Some((path.clone(), *match_count)),
            _ => None,
        })
        .collect();
    assert_eq!(
        matches,
        [(tmp.path().join("a.txt"), 1), (tmp.path().join("b.txt"), 1)]
    );

    let percents: Vec<f64> = messages
        .iter()
        .filter_map(|m| match m {
            ScanProgress::Progress { percent, .. } => Some(*percent),
            _ => None,
        })
        .collect();
    assert_eq!(percents.len(), 3);
    assert!(percents.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(*percents.last().unwrap(), 100.0);
}

/// A file that is not text is reported and skipped; the scan still completes.
#[test]
fn unreadable_file_is_skipped_not_fatal() {
    let tmp = TempDir::new().unwrap();
    build_fox_tree(tmp.path());
    fs::write(tmp.path().join("blob.bin"), [0xffu8, 0xfe, 0xfd, 0x00]).unwrap();

    let messages = run_to_end(tmp.path(), "the");
    let errors: Vec<_> = messages
        .iter()
        .filter_map(|m| match m {
            ScanProgress::Error { kind, path, .. } => Some((*kind, path.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(errors, [(FailureKind::Read, Some(tmp.path().join("blob.bin")))]);

    let summary = finished(&messages);
    assert_eq!(summary.processed_files, 3);
    assert_eq!(summary.skipped_files, 1);
    assert_eq!(summary.entries.len(), 2);
}

/// A report that cannot be written is surfaced, and results are still delivered.
#[test]
fn report_write_failure_still_delivers_results() {
    let tmp = TempDir::new().unwrap();
    build_fox_tree(tmp.path());
    // A directory squatting on the report name makes File::create fail.
    fs::create_dir_all(tmp.path().join("ForbiddenWordsReport.txt")).unwrap();

    let messages = run_to_end(tmp.path(), "the,dog");
    assert!(messages.iter().any(|m| matches!(
        m,
        ScanProgress::Error {
            kind: FailureKind::ReportWrite,
            ..
        }
    )));
    let summary = finished(&messages);
    assert!(summary.report_path.is_none());
    assert_eq!(summary.entries.len(), 2);
    assert_eq!(summary.frequency_of("the"), 2);
}

/// Re-inspecting a redacted file with the same words finds nothing.
#[test]
fn redacted_files_are_clean() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("memo.txt"), "secret token, another secret").unwrap();

    run_to_end(tmp.path(), "secret,token");

    let words = ForbiddenWordSet::parse("secret,token");
    let redacted = inspect(&tmp.path().join("Modified_memo.txt"), &words).unwrap();
    assert!(!redacted.matched());
}

/// Per-word sums over flagged files never exceed the global frequency.
#[test]
fn entry_totals_agree_with_frequencies() {
    let tmp = TempDir::new().unwrap();
    let sub = tmp.path().join("nested");
    fs::create_dir_all(&sub).unwrap();
    fs::write(tmp.path().join("one.txt"), "alpha beta alpha").unwrap();
    fs::write(sub.join("two.txt"), "beta gamma").unwrap();
    fs::write(sub.join("three.txt"), "nothing").unwrap();

    let messages = run_to_end(tmp.path(), "alpha,beta");
    let summary = finished(&messages);
    let total: u64 = summary.entries.iter().map(|e| e.word_count).sum();
    let freq: u64 = summary.frequencies.iter().map(|w| w.count).sum();
    assert_eq!(total, freq);
    assert_eq!(summary.frequency_of("alpha"), 2);
    assert_eq!(summary.frequency_of("beta"), 2);
    // Redacted copy lands in the nested folder, not at the root.
    assert!(sub.join("Modified_two.txt").exists());
}

/// An empty word list is rejected and nothing is created.
#[test]
fn empty_words_never_start() {
    let tmp = TempDir::new().unwrap();
    build_fox_tree(tmp.path());
    let mut engine = ScanEngine::default();
    engine.configure(tmp.path(), "  ,  ");
    assert!(matches!(engine.start(), Err(ScanError::Configuration(_))));
    assert_eq!(engine.state(), EngineState::Idle);
    assert!(!tmp.path().join("ForbiddenWordsFiles").exists());
}

/// Cancelling mid-scan keeps earlier side effects and writes no report.
#[test]
fn cancel_keeps_quarantined_files_and_skips_report() {
    let tmp = TempDir::new().unwrap();
    build_wide_tree(tmp.path(), 2_000);

    let mut engine = ScanEngine::default();
    engine.configure(tmp.path(), "secret");
    let rx = engine.start().unwrap();

    // Let the scan flag at least one file before stopping it.
    let deadline = Instant::now() + Duration::from_secs(30);
    let mut messages = Vec::new();
    loop {
        let left = deadline.saturating_duration_since(Instant::now());
        let msg = rx.recv_timeout(left).expect("no match within 30 seconds");
        let is_match = matches!(msg, ScanProgress::MatchFound { .. });
        messages.push(msg);
        if is_match {
            break;
        }
    }
    engine.pause();
    engine.cancel();
    messages.extend(drain(&rx));
    engine.join();

    let flagged_files = match messages.last() {
        Some(ScanProgress::Cancelled { flagged_files, .. }) => *flagged_files,
        other => panic!("expected Cancelled, got {other:?}"),
    };
    assert!(flagged_files >= 1);
    assert_eq!(engine.state(), EngineState::Cancelled);
    assert!(!tmp.path().join("ForbiddenWordsReport.txt").exists());

    let flagged: Vec<_> = messages
        .iter()
        .filter_map(|m| match m {
            ScanProgress::MatchFound { path, .. } => Some(path.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(flagged.len() as u64, flagged_files);
    for path in flagged {
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(tmp.path().join("ForbiddenWordsFiles").join(&name).exists());
        assert!(tmp.path().join(format!("Modified_{name}")).exists());
    }
}

/// Cancelling while paused wakes the scan thread promptly.
#[test]
fn cancel_while_paused_is_prompt() {
    let tmp = TempDir::new().unwrap();
    build_wide_tree(tmp.path(), 300);

    let mut engine = ScanEngine::default();
    engine.configure(tmp.path(), "secret");
    let rx = engine.start().unwrap();
    engine.pause();
    std::thread::sleep(Duration::from_millis(100));

    let t = Instant::now();
    engine.cancel();
    let messages = drain(&rx);
    engine.join();
    assert!(t.elapsed() < Duration::from_secs(5));
    assert!(messages.last().unwrap().is_terminal());
}

/// Pausing and resuming does not change the final report.
#[test]
fn pause_resume_matches_uninterrupted_run() {
    let tmp = TempDir::new().unwrap();
    build_wide_tree(tmp.path(), 120);
    let report_path = tmp.path().join("ForbiddenWordsReport.txt");

    run_to_end(tmp.path(), "secret,plan");
    let baseline = fs::read_to_string(&report_path).unwrap();
    fs::remove_file(&report_path).unwrap();

    // Second pass over the same root: redacted siblings from the first pass
    // no longer match, so the report must be identical.
    let mut engine = ScanEngine::default();
    engine.configure(tmp.path(), "secret,plan");
    let rx = engine.start().unwrap();
    engine.pause();
    std::thread::sleep(Duration::from_millis(50));
    let state = engine.state();
    assert!(
        state == EngineState::Paused || state == EngineState::Completed,
        "unexpected state {state:?}"
    );
    engine.resume();
    let messages = drain(&rx);
    engine.join();

    assert!(matches!(messages.last(), Some(ScanProgress::Finished(_))));
    assert_eq!(fs::read_to_string(&report_path).unwrap(), baseline);
}

/// Settings change artifact names and the mask.
#[test]
fn custom_settings_are_honoured() {
    let tmp = TempDir::new().unwrap();
    build_fox_tree(tmp.path());
    let settings = ScanSettings {
        quarantine_dir: "held".into(),
        redacted_prefix: "clean_".into(),
        report_file: "summary.txt".into(),
        mask_char: '#',
        top_words: 1,
        ..ScanSettings::default()
    };

    let mut engine = ScanEngine::new(settings);
    engine.configure(tmp.path(), "dog,the");
    let rx = engine.start().unwrap();
    drain(&rx);
    engine.join();

    assert!(tmp.path().join("held").join("b.txt").exists());
    assert_eq!(
        fs::read_to_string(tmp.path().join("clean_b.txt")).unwrap(),
        "### lazy ###"
    );
    let report = fs::read_to_string(tmp.path().join("summary.txt")).unwrap();
    assert!(report.contains("Top 1 most frequent"));
    assert!(report.contains("Word: the, Occurrences: 2"));
    assert!(!report.contains("Word: dog"));
}

/// An empty root completes immediately with an empty report.
#[test]
fn empty_root_completes() {
    let tmp = TempDir::new().unwrap();
    let messages = run_to_end(tmp.path(), "anything");
    let summary = finished(&messages);
    assert_eq!(summary.total_files, 0);
    assert!(summary.entries.is_empty());
    assert!(tmp.path().join("ForbiddenWordsReport.txt").exists());
}
