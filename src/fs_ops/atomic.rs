//! Atomic rename helper.
//! - On Windows, removes an existing destination first when overwriting (rename doesn't overwrite there).
//! - On Unix, best-effort fsync of the destination directory after rename.

use std::fs;
use std::io;
use std::path::Path;

pub(super) fn try_atomic_move(src: &Path, dst: &Path, overwrite: bool) -> io::Result<()> {
    #[cfg(windows)]
    if overwrite && dst.exists() {
        if let Err(e) = fs::remove_file(dst) {
            if e.kind() != io::ErrorKind::NotFound {
                return Err(e);
            }
        }
    }
    #[cfg(not(windows))]
    let _ = overwrite;

    fs::rename(src, dst)?;

    // Ignore fsync errors to avoid turning a successful rename into a failure.
    if let Some(parent) = dst.parent() {
        let _ = super::util::fsync_dir(parent);
    }
    Ok(())
}
