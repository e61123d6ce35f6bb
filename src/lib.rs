//! conc-copy - concurrent directory copy library
//!
//! Copies the contents of a source directory into a destination directory,
//! running one task per top-level file and one per top-level folder. Folder
//! tasks recurse sequentially and recreate each folder with its source
//! permissions. The CLI in `main.rs` is a thin wrapper around [`CopyEngine`].

pub mod args;
pub mod copy;
pub mod error;
pub mod listing;
pub mod stats;
pub mod utils;

mod engine;
mod progress;

pub use args::CopyOptions;
pub use copy::{CopySummary, copy_file, copy_folder};
pub use engine::{COMPLETION_MESSAGE, CopyEngine};
pub use error::{CopyError, Result};
pub use listing::{DirListing, Entry, EntryKind, list_entries};
pub use progress::{
    CliProgress, NullProgress, ProgressCallback, ProgressInfo, ProgressState, SharedProgress,
};
pub use stats::{CopyReport, Statistics, TaskOutcome};
pub use utils::Logger;

/// Application name
pub const APP_NAME: &str = "conc-copy";
