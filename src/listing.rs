//! One-level directory listing, partitioned into files and folders.

use std::ffi::OsString;
use std::fs;
use std::path::Path;

use crate::error::{CopyError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// A name read from a directory listing together with its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: OsString,
    pub kind: EntryKind,
}

/// Immediate children of a directory, in enumeration order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirListing {
    pub files: Vec<OsString>,
    pub folders: Vec<OsString>,
}

impl DirListing {
    pub fn len(&self) -> usize {
        self.files.len() + self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.folders.is_empty()
    }
}

/// Read the immediate entries of `dir`.
///
/// The kind comes from the directory entry itself and does not follow
/// symlinks: a link, whatever it points at, is listed as a file. Anything
/// that is not a directory is a file.
///
/// Fails as a whole if the directory or any of its entries cannot be read.
pub fn read_entries(dir: &Path) -> Result<Vec<Entry>> {
    let read_dir = fs::read_dir(dir).map_err(|e| CopyError::from_io(dir, e))?;

    let mut entries = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| CopyError::from_io(dir, e))?;
        let file_type = entry
            .file_type()
            .map_err(|e| CopyError::from_io(entry.path(), e))?;

        let kind = if file_type.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        entries.push(Entry {
            name: entry.file_name(),
            kind,
        });
    }

    Ok(entries)
}

/// List `dir` and split the names into files and folders.
pub fn list_entries(dir: &Path) -> Result<DirListing> {
    let mut listing = DirListing::default();

    for entry in read_entries(dir)? {
        match entry.kind {
            EntryKind::File => listing.files.push(entry.name),
            EntryKind::Directory => listing.folders.push(entry.name),
        }
    }

    log::debug!(
        "Listed {}: {} files, {} folders",
        dir.display(),
        listing.files.len(),
        listing.folders.len()
    );

    Ok(listing)
}
