use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crossbeam_channel::Sender;
use rayon::{Scope, ThreadPool, ThreadPoolBuilder};

use crate::args::CopyOptions;
use crate::copy::{CopySummary, copy_file, copy_folder};
use crate::error::{CopyError, Result};
use crate::listing::{EntryKind, list_entries};
use crate::progress::{ProgressCallback, ProgressInfo, ProgressState};
use crate::stats::{CopyReport, Statistics, TaskOutcome};

/// Last report line of every run that got past the top-level listing.
pub const COMPLETION_MESSAGE: &str = "All files and folders copied.";

/// Copies the top level of a source directory with one task per entry.
///
/// Each top-level file is streamed by its own task and each top-level
/// folder is copied recursively by its own task. Tasks write to disjoint
/// destination paths and share nothing but the outcome channel, which the
/// coordinating thread drains and forwards to the [`ProgressCallback`].
pub struct CopyEngine {
    options: CopyOptions,
    progress: Arc<dyn ProgressCallback>,
}

impl CopyEngine {
    pub fn new(options: CopyOptions, progress: Arc<dyn ProgressCallback>) -> Self {
        Self { options, progress }
    }

    /// Run the copy.
    ///
    /// Only a failure to list the source directory itself (or to start the
    /// worker pool) is returned as an error. Per-entry failures are
    /// reported through the callback and recorded in the [`CopyReport`].
    pub fn run(&self) -> Result<CopyReport> {
        let start_time = Instant::now();
        let src_dir = self.options.source.as_path();
        let dest_dir = self.options.destination.as_path();

        let mut info = ProgressInfo {
            state: ProgressState::Listing,
            ..Default::default()
        };
        self.progress.on_progress(&info);

        // Files and folders come from two separate listings.
        let files = self.report_err(list_entries(src_dir))?.files;
        let folders = self.report_err(list_entries(src_dir))?.folders;
        let folders = disjoint_folders(&files, folders);

        let pool = self.report_err(self.build_pool())?;

        log::debug!(
            "Dispatching {} file task(s) and {} folder task(s) from {} to {}",
            files.len(),
            folders.len(),
            src_dir.display(),
            dest_dir.display()
        );

        info.state = ProgressState::Copying;
        info.entries_total = (files.len() + folders.len()) as u64;
        self.progress.on_progress(&info);

        let stats = Statistics::new();
        let mut outcomes = Vec::with_capacity(files.len() + folders.len());
        let (tx, rx) = crossbeam_channel::unbounded();

        pool.in_place_scope(|scope| {
            for name in &files {
                spawn_task(scope, &tx, src_dir, dest_dir, name, EntryKind::File);
            }
            for name in &folders {
                spawn_task(scope, &tx, src_dir, dest_dir, name, EntryKind::Directory);
            }
            drop(tx);

            // Ends once every task has sent its outcome and dropped its sender.
            for outcome in rx.iter() {
                self.record(&outcome, &stats, &mut info);
                outcomes.push(outcome);
            }
        });

        self.progress.on_log(COMPLETION_MESSAGE);

        info.state = ProgressState::Completed;
        self.progress.on_progress(&info);

        let elapsed = start_time.elapsed();
        log::info!(
            "Finished {} -> {} in {:.2?}\n{}",
            src_dir.display(),
            dest_dir.display(),
            elapsed,
            stats
        );

        Ok(CopyReport {
            outcomes,
            stats,
            elapsed,
        })
    }

    fn build_pool(&self) -> Result<ThreadPool> {
        ThreadPoolBuilder::new()
            .num_threads(self.options.threads)
            .thread_name(|i| format!("conc-copy-{}", i))
            .build()
            .map_err(|e| CopyError::ThreadPool(e.to_string()))
    }

    fn report_err<T>(&self, result: Result<T>) -> Result<T> {
        result.inspect_err(|e| self.progress.on_log(&e.to_string()))
    }

    fn record(&self, outcome: &TaskOutcome, stats: &Statistics, info: &mut ProgressInfo) {
        match (&outcome.result, outcome.kind) {
            (Ok(summary), EntryKind::File) => stats.add_file_copied(summary.bytes_copied),
            (Ok(summary), EntryKind::Directory) => stats.add_folder_copied(summary),
            (Err(e), EntryKind::File) => {
                log::debug!("File {} failed: {}", outcome.name, e);
                stats.add_file_failed();
            }
            (Err(e), EntryKind::Directory) => {
                log::debug!("Folder {} failed: {}", outcome.name, e);
                stats.add_folder_failed();
            }
        }

        info.entries_done += 1;
        info.current_entry = outcome.name.clone();
        if let Ok(summary) = &outcome.result {
            info.bytes_done += summary.bytes_copied;
        }

        self.progress.on_outcome(outcome);
        self.progress.on_progress(info);
    }
}

/// Drop folder names that also showed up as files between the two listings,
/// so no two tasks ever share a destination path.
fn disjoint_folders(files: &[OsString], folders: Vec<OsString>) -> Vec<OsString> {
    let file_names: HashSet<&OsString> = files.iter().collect();
    folders
        .into_iter()
        .filter(|name| {
            let clash = file_names.contains(name);
            if clash {
                log::warn!(
                    "Skipping folder {}: also listed as a file",
                    name.to_string_lossy()
                );
            }
            !clash
        })
        .collect()
}

fn spawn_task<'scope>(
    scope: &Scope<'scope>,
    tx: &Sender<TaskOutcome>,
    src_dir: &Path,
    dest_dir: &Path,
    name: &OsString,
    kind: EntryKind,
) {
    let tx = tx.clone();
    let src = src_dir.join(name);
    let dest_parent = dest_dir.to_path_buf();
    let dest = dest_dir.join(name);
    let name = name.to_string_lossy().into_owned();

    scope.spawn(move |_| {
        log::debug!("Copying {:?} {}", kind, src.display());

        let result = match kind {
            EntryKind::File => fs::create_dir_all(&dest_parent)
                .map_err(|e| CopyError::from_io(&dest_parent, e))
                .and_then(|_| copy_file(&src, &dest))
                .map(|bytes| CopySummary {
                    files_copied: 1,
                    bytes_copied: bytes,
                    ..Default::default()
                }),
            EntryKind::Directory => copy_folder(&src, &dest),
        };

        // The receiver lives until every sender is gone.
        let _ = tx.send(TaskOutcome { name, kind, result });
    });
}
