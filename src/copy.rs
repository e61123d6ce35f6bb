use std::fs::{self, File, Permissions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::vec;

use crate::error::{CopyError, Result};
use crate::listing::{Entry, EntryKind, read_entries};

const BUFFER_SIZE: usize = 64 * 1024;

/// Totals for one copy task, file or folder.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CopySummary {
    pub folders_created: u64,
    pub files_copied: u64,
    pub bytes_copied: u64,
}

/// Recursively copy the folder `src` to `dest`.
///
/// Every destination folder is created with the permissions of its source
/// folder. Files are created or truncated and their contents streamed
/// across; their own permission bits are left to the platform default.
/// Entries are handled one at a time in listing order, descending into a
/// subfolder as soon as it is reached.
///
/// The first failure aborts the whole copy. Whatever was already written
/// stays on disk.
pub fn copy_folder(src: &Path, dest: &Path) -> Result<CopySummary> {
    let mut summary = CopySummary::default();

    // Folders currently being walked, innermost last.
    let mut stack = vec![open_folder(src, dest, &mut summary)?];

    while let Some(folder) = stack.last_mut() {
        let Some(entry) = folder.entries.next() else {
            stack.pop();
            continue;
        };

        let src_path = folder.src.join(&entry.name);
        let dest_path = folder.dest.join(&entry.name);

        match entry.kind {
            EntryKind::Directory => {
                let child = open_folder(&src_path, &dest_path, &mut summary)?;
                stack.push(child);
            }
            EntryKind::File => {
                summary.bytes_copied += copy_file(&src_path, &dest_path)?;
                summary.files_copied += 1;
            }
        }
    }

    Ok(summary)
}

struct OpenFolder {
    src: PathBuf,
    dest: PathBuf,
    entries: vec::IntoIter<Entry>,
}

/// Create the destination folder for `src` and list what it holds.
fn open_folder(src: &Path, dest: &Path, summary: &mut CopySummary) -> Result<OpenFolder> {
    let permissions = fs::metadata(src)
        .map_err(|e| CopyError::from_io(src, e))?
        .permissions();

    if create_folder(dest, &permissions)? {
        summary.folders_created += 1;
    }

    Ok(OpenFolder {
        src: src.to_path_buf(),
        dest: dest.to_path_buf(),
        entries: read_entries(src)?.into_iter(),
    })
}

/// Create `dest` (and any missing parents) with the given permissions.
///
/// Returns `Ok(false)` when `dest` already is a directory, which is left
/// untouched.
pub fn create_folder(dest: &Path, permissions: &Permissions) -> Result<bool> {
    match fs::metadata(dest) {
        Ok(meta) if meta.is_dir() => return Ok(false),
        Ok(_) => {
            return Err(CopyError::AlreadyExistsAsWrongType {
                path: dest.to_path_buf(),
            });
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(CopyError::from_io(dest, e)),
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::{DirBuilderExt, PermissionsExt};
        builder.mode(permissions.mode());
    }
    builder.create(dest).map_err(|e| CopyError::from_io(dest, e))?;

    // The builder's mode is filtered through the umask.
    fs::set_permissions(dest, permissions.clone()).map_err(|e| CopyError::from_io(dest, e))?;

    log::debug!("Created directory: {}", dest.display());
    Ok(true)
}

/// Stream the contents of `src` into `dest`, creating or truncating it.
/// Returns the number of bytes written.
pub fn copy_file(src: &Path, dest: &Path) -> Result<u64> {
    let mut src_file = File::open(src).map_err(|e| CopyError::from_io(src, e))?;
    let mut dest_file = File::create(dest).map_err(|e| CopyError::from_io(dest, e))?;

    let mut buffer = vec![0u8; BUFFER_SIZE];
    let mut bytes_copied: u64 = 0;

    loop {
        let bytes_read = match src_file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CopyError::stream(src, dest, e)),
        };

        dest_file
            .write_all(&buffer[..bytes_read])
            .map_err(|e| CopyError::stream(src, dest, e))?;

        bytes_copied += bytes_read as u64;
    }

    dest_file.flush().map_err(|e| CopyError::stream(src, dest, e))?;
    Ok(bytes_copied)
}
