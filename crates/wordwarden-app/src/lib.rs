/// WordWarden App: headless frontend for the scan engine.
///
/// This crate holds the caller-side state machine and the console
/// presenter. Business logic lives in `wordwarden-core`.
pub mod console;
pub mod state;

pub use console::ConsolePresenter;
pub use state::{AppPhase, AppState};
