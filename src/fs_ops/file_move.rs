//! Single-file move.
//! Ensures the destination directory exists, applies the duplicate policy,
//! then renames; on cross-filesystem errors falls back to copy + remove.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::errors::ImportError;
use crate::report::{ImportEvent, Reporter};

use super::atomic::try_atomic_move;
use super::copy::copy_and_rename;
use super::duplicate::{OnDuplicate, is_occupied, resolve_destination_with};
use super::helpers::{io_hint, is_cross_device};

/// Knobs for the Mover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveOptions {
    pub on_duplicate: OnDuplicate,
    /// Report the planned move but leave the filesystem untouched.
    ///
    /// A single `try_move_file` call only sees the current filesystem. The
    /// import pass additionally remembers destinations it has already planned,
    /// so two names cleaning to the same result are resolved as in a real run.
    pub dry_run: bool,
}

/// Move `src` to `dest_dir/name`, creating `dest_dir` (and parents) if missing.
/// Returns the final destination path.
pub fn try_move_file(
    src: &Path,
    dest_dir: &Path,
    name: &str,
    opts: &MoveOptions,
) -> Result<PathBuf, ImportError> {
    try_move_file_claimed(src, dest_dir, name, opts, &HashSet::new())
}

/// `try_move_file`, treating every path in `claimed` as occupied.
pub(crate) fn try_move_file_claimed(
    src: &Path,
    dest_dir: &Path,
    name: &str,
    opts: &MoveOptions,
    claimed: &HashSet<PathBuf>,
) -> Result<PathBuf, ImportError> {
    let overwrite = opts.on_duplicate == OnDuplicate::Overwrite;

    if !opts.dry_run && !dest_dir.is_dir() {
        fs::create_dir_all(dest_dir).map_err(|source| ImportError::CreateDestination {
            path: dest_dir.to_path_buf(),
            source,
        })?;
        debug!(path = %dest_dir.display(), "created destination directory");
    }

    let taken = |p: &Path| claimed.contains(p) || is_occupied(p);
    let dest = resolve_destination_with(dest_dir, OsStr::new(name), opts.on_duplicate, &taken);
    if !overwrite && taken(dest.as_path()) {
        return Err(ImportError::DestinationExists { path: dest });
    }
    if opts.dry_run {
        return Ok(dest);
    }

    let move_err = |source| ImportError::Move {
        src: src.to_path_buf(),
        dest: dest.clone(),
        source,
    };

    try_atomic_move(src, &dest, overwrite)
        .or_else(|e| recover_from_rename_error(src, &dest, overwrite, e))
        .map_err(move_err)?;
    Ok(dest)
}

/// Handle a failed rename. Cross-device errors fall back to copy + remove;
/// anything else is returned unchanged.
///
/// If the source cannot be removed after copying, the copy is deleted again
/// so the file ends up in exactly one place.
fn recover_from_rename_error(src: &Path, dest: &Path, overwrite: bool, err: io::Error) -> io::Result<()> {
    if !is_cross_device(&err) {
        return Err(err);
    }
    warn!(
        src = %src.display(),
        dest = %dest.display(),
        hint = io_hint(&err).unwrap_or_default(),
        "Atomic rename failed, using copy + remove"
    );
    copy_and_rename(src, dest, overwrite)?;
    if let Err(e) = fs::remove_file(src) {
        warn!(src = %src.display(), error = %e, "could not remove source after copy; undoing copy");
        let _ = fs::remove_file(dest);
        return Err(e);
    }
    Ok(())
}

/// Move one file and report the outcome. Never fails; returns `true` on success.
pub fn move_file(
    src: &Path,
    dest_dir: &Path,
    name: &str,
    opts: &MoveOptions,
    reporter: &dyn Reporter,
) -> bool {
    let result = try_move_file(src, dest_dir, name, opts);
    report_move(src, &result, opts, reporter);
    result.is_ok()
}

/// Emit the event matching a Mover result.
pub(crate) fn report_move(
    src: &Path,
    result: &Result<PathBuf, ImportError>,
    opts: &MoveOptions,
    reporter: &dyn Reporter,
) {
    match result {
        Ok(dest) if opts.dry_run => reporter.report(&ImportEvent::WouldMove { src, dest }),
        Ok(dest) => reporter.report(&ImportEvent::Moved { src, dest }),
        Err(error @ ImportError::DestinationExists { .. }) => {
            reporter.report(&ImportEvent::Skipped { src, error })
        }
        Err(error) => reporter.report(&ImportEvent::MoveFailed { src, error }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{EventRecord, RecordingReporter};
    use assert_fs::prelude::*;

    #[test]
    fn moves_into_new_nested_directory() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("input/original_file.txt");
        src.write_str("This is the content of the file to be moved.").unwrap();
        let dest_dir = temp.child("import/deeper");

        let rec = RecordingReporter::new();
        let ok = move_file(
            src.path(),
            dest_dir.path(),
            "moved_and_renamed_file.log",
            &MoveOptions::default(),
            &rec,
        );

        assert!(ok);
        assert!(dest_dir.path().is_dir());
        assert!(!src.path().exists());
        dest_dir
            .child("moved_and_renamed_file.log")
            .assert("This is the content of the file to be moved.");
        assert_eq!(rec.moved_count(), 1);
        assert_eq!(rec.failed_count(), 0);
    }

    #[test]
    fn missing_source_reports_failure() {
        let temp = assert_fs::TempDir::new().unwrap();
        let rec = RecordingReporter::new();
        let ok = move_file(
            &temp.path().join("ghost.txt"),
            &temp.path().join("out"),
            "ghost.txt",
            &MoveOptions::default(),
            &rec,
        );
        assert!(!ok);
        assert!(matches!(
            rec.events().as_slice(),
            [EventRecord::MoveFailed { kind: "move", .. }]
        ));
    }

    #[cfg(unix)]
    #[test]
    fn cross_device_error_falls_back_to_copy_and_remove() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("input/big.bin");
        src.write_str("payload").unwrap();
        temp.child("import").create_dir_all().unwrap();
        let dest = temp.child("import/big.bin");

        let exdev = io::Error::from_raw_os_error(libc::EXDEV);
        recover_from_rename_error(src.path(), dest.path(), false, exdev).unwrap();

        assert!(!src.path().exists());
        dest.assert("payload");
    }

    #[test]
    fn other_rename_errors_pass_through() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("a.txt");
        src.write_str("a").unwrap();
        let dest = temp.child("b.txt");

        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        let err = recover_from_rename_error(src.path(), dest.path(), false, denied).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert!(src.path().exists());
        assert!(!dest.path().exists());
    }

    #[test]
    fn dry_run_touches_nothing() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("a.txt");
        src.write_str("a").unwrap();
        let dest_dir = temp.child("out");
        let opts = MoveOptions { dry_run: true, ..Default::default() };

        let rec = RecordingReporter::new();
        assert!(move_file(src.path(), dest_dir.path(), "a.txt", &opts, &rec));
        assert!(src.path().exists());
        assert!(!dest_dir.path().exists());
        assert!(matches!(rec.events().as_slice(), [EventRecord::WouldMove { .. }]));
    }
}
