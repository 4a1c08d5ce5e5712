/// Cross-thread control block shared by the caller and the scan thread.
///
/// The caller writes the cancel and pause flags; the scan thread reads them
/// at each per-file check point and publishes its lifecycle state. Pausing
/// parks the scan thread on a condition variable instead of spinning.
use parking_lot::{Condvar, Mutex};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Engine lifecycle.
///
/// `Paused` is a sub-state of `Running`; `Completed` and `Cancelled` are
/// terminal until the engine is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EngineState {
    Idle,
    Running,
    Paused,
    Completed,
    Cancelled,
}

impl EngineState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    pub fn is_active(self) -> bool {
        matches!(self, Self::Running | Self::Paused)
    }
}

#[derive(Debug)]
pub struct ScanControl {
    cancel_flag: AtomicBool,
    paused: Mutex<bool>,
    resumed: Condvar,
    state: Mutex<EngineState>,
}

impl Default for ScanControl {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanControl {
    pub fn new() -> Self {
        Self {
            cancel_flag: AtomicBool::new(false),
            paused: Mutex::new(false),
            resumed: Condvar::new(),
            state: Mutex::new(EngineState::Idle),
        }
    }

    /// Request the scan to stop at the next check point.
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::Release);
        // Taking the lock orders the store before a paused waiter re-checks.
        let _paused = self.paused.lock();
        self.resumed.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::Acquire)
    }

    pub fn pause(&self) {
        *self.paused.lock() = true;
    }

    pub fn resume(&self) {
        *self.paused.lock() = false;
        self.resumed.notify_all();
    }

    pub fn is_paused(&self) -> bool {
        *self.paused.lock()
    }

    /// Block while paused. Returns `false` if cancellation was requested.
    ///
    /// `recheck` bounds each individual wait so a lost wake-up cannot
    /// stall the scan forever.
    pub fn wait_while_paused(&self, recheck: Duration) -> bool {
        let mut paused = self.paused.lock();
        while *paused && !self.is_cancelled() {
            self.resumed.wait_for(&mut paused, recheck);
        }
        !self.is_cancelled()
    }

    /// Observable state; reports `Paused` while running with the flag set.
    pub fn state(&self) -> EngineState {
        let state = *self.state.lock();
        if state == EngineState::Running && self.is_paused() {
            EngineState::Paused
        } else {
            state
        }
    }

    pub(crate) fn set_state(&self, state: EngineState) {
        *self.state.lock() = state;
    }
}
