//! Unix implementations of platform helpers.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::Path;

/// Open log file for appending; 0600 when newly created, existing modes are kept.
/// O_NOFOLLOW: refuse to write through a symlink placed at the log path itself.
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .mode(0o600) // applies on create
        .custom_flags(libc::O_NOFOLLOW)
        .open(path)
}

/// Create `path` (must not exist) with mode 0600, write `contents` and fsync.
pub fn write_new_file_0600(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut f = OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .custom_flags(libc::O_NOFOLLOW)
        .open(path)?;
    f.write_all(contents)?;
    f.sync_all()
}

/// POSIX chmod 0700 for directories.
pub fn set_dir_mode_0700(path: &Path) -> io::Result<()> {
    fs::set_permissions(path, fs::Permissions::from_mode(0o700))
}
