use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::error::{CopyError, Result};

/// Prints report lines to stdout and optionally mirrors them to a file.
#[derive(Clone)]
pub struct Logger {
    file: Arc<Mutex<Option<File>>>,
}

impl Logger {
    pub fn new(file: Option<File>) -> Self {
        Logger {
            file: Arc::new(Mutex::new(file)),
        }
    }

    /// Build a logger, creating (or truncating) the mirror file if one is given.
    pub fn create(log_file: Option<&Path>) -> Result<Self> {
        let file = match log_file {
            Some(path) => Some(File::create(path).map_err(|source| CopyError::LogFile {
                path: path.to_path_buf(),
                source,
            })?),
            None => None,
        };
        Ok(Self::new(file))
    }

    pub fn log(&self, message: &str) {
        println!("{}", message);
        self.log_file_only(message);
    }

    // Log only to file, not stdout
    pub fn log_file_only(&self, message: &str) {
        if let Ok(mut file_guard) = self.file.lock() {
            if let Some(file) = file_guard.as_mut() {
                if let Err(e) = writeln!(file, "{}", message) {
                    log::warn!("Unable to write to log file: {}", e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_mirrors_lines_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.log");

        let logger = Logger::create(Some(&path)).unwrap();
        logger.log("File copied: a.txt");
        logger.log_file_only("All files and folders copied.");
        drop(logger);

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "File copied: a.txt\nAll files and folders copied.\n"
        );
    }

    #[test]
    fn test_unwritable_log_location() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("run.log");

        let err = Logger::create(Some(&path)).err().unwrap();

        assert!(matches!(err, CopyError::LogFile { .. }));
    }
}
