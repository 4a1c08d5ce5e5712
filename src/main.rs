//! WordWarden: forbidden-word scanner, quarantine and redaction tool.
//!
//! Thin binary entry point. All logic lives in the `wordwarden-core`
//! and `wordwarden-app` crates.
//!
//! While a scan runs, type `p` + Enter to pause, `r` to resume and `c` to
//! cancel.

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::{select, Receiver};
use std::io::BufRead;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tracing::{info, warn};
use wordwarden_app::{AppPhase, AppState, ConsolePresenter};
use wordwarden_core::scanner::ScanCommand;
use wordwarden_core::ScanSettings;

/// How long the tick loop waits for a command before draining notifications.
const TICK: Duration = Duration::from_millis(50);

#[derive(Parser, Debug)]
#[command(
    name = "wordwarden",
    version,
    about = "Find files containing forbidden words, quarantine them and write redacted copies"
)]
struct Cli {
    /// Folder to scan recursively.
    root: PathBuf,

    /// Comma-separated forbidden words, e.g. "secret, internal,draft".
    #[arg(short, long)]
    words: String,

    /// TOML settings file (folder names, mask character, ranking size).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Mask character used for redaction (overrides the settings file).
    #[arg(long)]
    mask: Option<char>,

    /// Number of words in the frequency ranking (overrides the settings file).
    #[arg(long)]
    top: Option<usize>,

    /// Also write the final summary as JSON to this path.
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// Print progress every N percent.
    #[arg(long, default_value_t = 10)]
    progress_step: u32,

    /// Enable debug logging (RUST_LOG takes precedence).
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = load_settings(&cli)?;
    info!(root = %cli.root.display(), "WordWarden starting");

    let mut state = AppState::new(settings);
    state
        .start_scan(cli.root.clone(), &cli.words)
        .context("scan could not be started")?;

    let mut commands = spawn_command_reader();
    let mut presenter = ConsolePresenter::new(cli.progress_step);

    while state.phase == AppPhase::Scanning {
        let mut stdin_closed = false;
        select! {
            recv(commands) -> cmd => match cmd {
                Ok(cmd) => {
                    state.engine.apply(cmd);
                    println!("{}", command_echo(cmd));
                }
                Err(_) => stdin_closed = true,
            },
            default(TICK) => {}
        }
        if stdin_closed {
            // Keep scanning without interactive control.
            commands = crossbeam_channel::never();
        }
        state.process_scan_messages_with(|msg| {
            for line in presenter.render(msg) {
                println!("{line}");
            }
        });
    }

    if let Some(path) = &cli.summary_json {
        match &state.summary {
            Some(summary) => {
                let json = serde_json::to_string_pretty(summary)
                    .context("failed to serialise scan summary")?;
                std::fs::write(path, json)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!("Summary written to {}", path.display());
            }
            None => warn!("Scan did not complete; no summary written"),
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn load_settings(cli: &Cli) -> Result<ScanSettings> {
    let mut settings = match &cli.config {
        Some(path) => ScanSettings::load(path)?,
        None => ScanSettings::default(),
    };
    if let Some(mask) = cli.mask {
        settings.mask_char = mask;
    }
    if let Some(top) = cli.top {
        settings.top_words = top;
    }
    Ok(settings)
}

/// Read pause/resume/cancel commands from stdin on a helper thread.
fn spawn_command_reader() -> Receiver<ScanCommand> {
    let (tx, rx) = crossbeam_channel::unbounded();
    let spawned = thread::Builder::new()
        .name("wordwarden-stdin".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                match ScanCommand::parse(&line) {
                    Some(cmd) => {
                        if tx.send(cmd).is_err() {
                            break;
                        }
                    }
                    None if line.trim().is_empty() => {}
                    None => eprintln!("Unknown command '{}'; use p, r or c", line.trim()),
                }
            }
        });
    if let Err(e) = spawned {
        warn!("Interactive control unavailable: {e}");
        return crossbeam_channel::never();
    }
    rx
}

fn command_echo(cmd: ScanCommand) -> &'static str {
    match cmd {
        ScanCommand::Pause => "Paused. Type 'r' to resume or 'c' to cancel.",
        ScanCommand::Resume => "Resumed.",
        ScanCommand::Cancel => "Stopping...",
    }
}
