//! Error types for the copy engine.
//!
//! Every variant carries the path it failed on so a frontend can print the
//! error on its own and still make sense of it.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CopyError {
    /// Source or destination path does not exist
    #[error("Path not found: '{path}': {source}")]
    PathNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Path exists but could not be opened, listed or written
    #[error("Permission denied: '{path}': {source}")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Destination folder path is taken by something that is not a directory
    #[error("Already exists and is not a directory: '{path}'")]
    AlreadyExistsAsWrongType { path: PathBuf },

    /// Read or write failure while streaming file contents
    #[error("I/O stream failure copying '{src}' to '{dest}': {source}")]
    IoStreamFailure {
        src: PathBuf,
        dest: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    #[error("Unable to create log file '{path}': {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CopyError {
    /// Classify a filesystem error raised while operating on `path`.
    pub fn from_io(path: impl AsRef<Path>, source: io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => Self::PathNotFound { path, source },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path, source },
            _ => Self::Io { path, source },
        }
    }

    pub fn stream(src: impl AsRef<Path>, dest: impl AsRef<Path>, source: io::Error) -> Self {
        Self::IoStreamFailure {
            src: src.as_ref().to_path_buf(),
            dest: dest.as_ref().to_path_buf(),
            source,
        }
    }

}

pub type Result<T> = std::result::Result<T, CopyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_error_kind() {
        let err = CopyError::from_io("missing", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, CopyError::PathNotFound { .. }));

        let err = CopyError::from_io("locked", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, CopyError::PermissionDenied { .. }));

        let err = CopyError::from_io("other", io::Error::from(io::ErrorKind::InvalidData));
        assert!(matches!(err, CopyError::Io { .. }));
    }

    #[test]
    fn message_names_the_offending_path() {
        let err = CopyError::from_io(
            "src/a.txt",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(err.to_string().contains("src/a.txt"));
    }
}
