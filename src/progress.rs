//! Reporting seam between the copy engine and its frontends.
//!
//! The engine never prints. It hands every report line and progress
//! snapshot to a [`ProgressCallback`], always from the coordinating thread,
//! so a frontend sees one line at a time.

use std::sync::{Arc, Mutex, PoisonError};

use crate::stats::TaskOutcome;
use crate::utils::Logger;

/// Current state of a copy run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressState {
    /// Not started
    Idle,
    /// Listing the top-level entries of the source
    Listing,
    /// Copy tasks are running
    Copying,
    /// Every task has finished
    Completed,
}

/// Snapshot of a run's progress
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    pub state: ProgressState,
    /// Name of the top-level entry that finished last
    pub current_entry: String,
    /// Top-level entries finished so far, successful or not
    pub entries_done: u64,
    /// Top-level entries dispatched
    pub entries_total: u64,
    /// Bytes written by the finished entries
    pub bytes_done: u64,
}

impl Default for ProgressInfo {
    fn default() -> Self {
        Self {
            state: ProgressState::Idle,
            current_entry: String::new(),
            entries_done: 0,
            entries_total: 0,
            bytes_done: 0,
        }
    }
}

impl ProgressInfo {
    /// Finished entries as a percentage (0-100)
    pub fn percentage(&self) -> f32 {
        if self.entries_total == 0 {
            0.0
        } else {
            (self.entries_done as f32 / self.entries_total as f32) * 100.0
        }
    }
}

/// Receives progress updates and report lines from the copy engine.
pub trait ProgressCallback: Send + Sync {
    /// Called when progress information is updated
    fn on_progress(&self, info: &ProgressInfo);

    /// Called with each report line
    fn on_log(&self, message: &str);

    /// Called once per finished top-level entry
    fn on_outcome(&self, outcome: &TaskOutcome) {
        self.on_log(&outcome.message());
    }
}

/// Discards everything.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
    fn on_log(&self, _message: &str) {}
}

/// Console frontend: report lines go to stdout through a [`Logger`].
pub struct CliProgress {
    logger: Logger,
    quiet: bool,
}

impl CliProgress {
    /// With `quiet` set, per-entry success lines are dropped. Errors and the
    /// completion line are always printed.
    pub fn new(logger: Logger, quiet: bool) -> Self {
        Self { logger, quiet }
    }
}

impl ProgressCallback for CliProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        log::debug!(
            "{:?}: {:.0}% - {} of {} entries, {} bytes",
            info.state,
            info.percentage(),
            info.entries_done,
            info.entries_total,
            info.bytes_done
        );
    }

    fn on_log(&self, message: &str) {
        self.logger.log(message);
    }

    fn on_outcome(&self, outcome: &TaskOutcome) {
        if self.quiet && outcome.is_ok() {
            return;
        }
        self.on_log(&outcome.message());
    }
}

/// Keeps the latest snapshot and every report line in memory.
///
/// Useful for embedding the engine in another program, where the caller
/// polls from its own thread.
#[derive(Clone)]
pub struct SharedProgress {
    info: Arc<Mutex<ProgressInfo>>,
    log_messages: Arc<Mutex<Vec<String>>>,
}

impl SharedProgress {
    pub fn new() -> Self {
        Self {
            info: Arc::new(Mutex::new(ProgressInfo::default())),
            log_messages: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get the current progress info
    pub fn get_info(&self) -> ProgressInfo {
        self.info
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Get and clear log messages
    pub fn take_logs(&self) -> Vec<String> {
        let mut logs = self
            .log_messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *logs)
    }
}

impl Default for SharedProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressCallback for SharedProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        *self.info.lock().unwrap_or_else(PoisonError::into_inner) = info.clone();
    }

    fn on_log(&self, message: &str) {
        self.log_messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        let mut info = ProgressInfo::default();
        assert_eq!(info.percentage(), 0.0);

        info.entries_total = 4;
        info.entries_done = 1;
        assert_eq!(info.percentage(), 25.0);
    }

    #[test]
    fn test_shared_progress_collects_logs_and_state() {
        let progress = SharedProgress::new();
        progress.on_log("first");
        progress.on_log("second");
        progress.on_progress(&ProgressInfo {
            state: ProgressState::Copying,
            entries_total: 2,
            ..Default::default()
        });

        assert_eq!(progress.take_logs(), vec!["first", "second"]);
        assert!(progress.take_logs().is_empty());
        assert_eq!(progress.get_info().state, ProgressState::Copying);
        assert_eq!(progress.get_info().entries_total, 2);
    }
}
