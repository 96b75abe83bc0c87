//! Source directory listing.
//! Returns the regular files directly inside a directory; subdirectories and
//! their contents are ignored without error.

use std::ffi::OsString;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::errors::ImportError;
use crate::report::{ImportEvent, Reporter};

/// List regular files directly inside `dir`.
///
/// Entries are classified with `fs::metadata`, so a symlink to a file counts
/// as a file and a dangling symlink is dropped. Order is whatever the OS
/// returns.
pub fn try_list_files(dir: &Path) -> Result<Vec<OsString>, ImportError> {
    let read_err = |source| ImportError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };

    let entries = fs::read_dir(dir).map_err(read_err)?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(read_err)?;
        let path = entry.path();
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => {
                debug!(name = ?entry.file_name(), "found file");
                names.push(entry.file_name());
            }
            Ok(_) => {}
            Err(e) => {
                debug!(path = %path.display(), error = %e, "skipping entry with unreadable metadata");
            }
        }
    }
    Ok(names)
}

/// Like `try_list_files`, but reports a read failure and yields an empty list.
pub fn list_files(dir: &Path, reporter: &dyn Reporter) -> Vec<OsString> {
    match try_list_files(dir) {
        Ok(names) => names,
        Err(error) => {
            reporter.report(&ImportEvent::DirectoryReadFailed { dir, error: &error });
            Vec::new()
        }
    }
}
