use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::copy::CopySummary;
use crate::error::CopyError;
use crate::listing::EntryKind;

#[derive(Debug, Default)]
pub struct Statistics {
    pub files_copied: AtomicU64,
    pub folders_copied: AtomicU64,
    pub dirs_created: AtomicU64,
    pub bytes_copied: AtomicU64,
    pub files_failed: AtomicU64,
    pub folders_failed: AtomicU64,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file_copied(&self, bytes: u64) {
        self.files_copied.fetch_add(1, Ordering::Relaxed);
        self.bytes_copied.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn add_folder_copied(&self, summary: &CopySummary) {
        self.folders_copied.fetch_add(1, Ordering::Relaxed);
        self.dirs_created
            .fetch_add(summary.folders_created, Ordering::Relaxed);
        self.files_copied
            .fetch_add(summary.files_copied, Ordering::Relaxed);
        self.bytes_copied
            .fetch_add(summary.bytes_copied, Ordering::Relaxed);
    }

    pub fn add_file_failed(&self) {
        self.files_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_folder_failed(&self) {
        self.folders_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn failures(&self) -> u64 {
        self.files_failed.load(Ordering::Relaxed) + self.folders_failed.load(Ordering::Relaxed)
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Statistics:")?;
        writeln!(
            f,
            "    Files copied:        {}",
            self.files_copied.load(Ordering::Relaxed)
        )?;
        writeln!(
            f,
            "    Folders copied:      {}",
            self.folders_copied.load(Ordering::Relaxed)
        )?;
        writeln!(
            f,
            "    Directories created: {}",
            self.dirs_created.load(Ordering::Relaxed)
        )?;
        writeln!(
            f,
            "    Bytes copied:        {}",
            self.bytes_copied.load(Ordering::Relaxed)
        )?;
        writeln!(
            f,
            "    Files failed:        {}",
            self.files_failed.load(Ordering::Relaxed)
        )?;
        write!(
            f,
            "    Folders failed:      {}",
            self.folders_failed.load(Ordering::Relaxed)
        )
    }
}

/// What one top-level copy task produced.
#[derive(Debug)]
pub struct TaskOutcome {
    pub name: String,
    pub kind: EntryKind,
    pub result: Result<CopySummary, CopyError>,
}

impl TaskOutcome {
    /// The report line for this outcome.
    pub fn message(&self) -> String {
        match (&self.result, self.kind) {
            (Ok(_), EntryKind::File) => format!("File copied: {}", self.name),
            (Ok(_), EntryKind::Directory) => format!("Folder copied: {}", self.name),
            (Err(e), _) => e.to_string(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Result of a completed run.
#[derive(Debug)]
pub struct CopyReport {
    /// Per-entry outcomes in the order they completed.
    pub outcomes: Vec<TaskOutcome>,
    pub stats: Statistics,
    pub elapsed: Duration,
}

impl CopyReport {
    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|o| !o.is_ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = &TaskOutcome> {
        self.outcomes.iter().filter(|o| !o.is_ok())
    }
}
