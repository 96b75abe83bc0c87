//! I/O error helpers.
//!
//! Maps raw OS error codes to short actionable hints for log fields, and
//! detects the cross-device case that forces a copy instead of a rename.

use std::io;

/// Short, platform-aware hint for an io::Error, if one applies.
pub fn io_hint(e: &io::Error) -> Option<&'static str> {
    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            let hint = match code {
                libc::EACCES | libc::EPERM => {
                    Some("permission denied; check ownership and write permissions")
                }
                libc::EXDEV => Some("cross-filesystem; atomic rename not possible"),
                libc::EBUSY => Some("resource busy; ensure no other process is writing"),
                libc::ENOENT => Some("path not found; verify it exists"),
                libc::EEXIST => Some("already exists; pick a unique name or remove the target"),
                libc::ENOSPC => Some("insufficient space on device"),
                libc::EROFS => Some("read-only filesystem; cannot write here"),
                libc::ENAMETOOLONG => Some("filename or path too long; shorten path segments"),
                libc::ENOTDIR => Some("a path component is not a directory"),
                libc::EISDIR => Some("target is a directory"),
                _ => None,
            };
            if hint.is_some() {
                return hint;
            }
        }
        #[cfg(windows)]
        {
            let hint = match code {
                5 => Some("access denied; check permissions"), // ERROR_ACCESS_DENIED
                17 => Some("not same device; cross-filesystem move"), // ERROR_NOT_SAME_DEVICE
                32 => Some("sharing violation; file is in use"), // ERROR_SHARING_VIOLATION
                2 | 3 => Some("path not found; verify it exists"), // FILE/PATH NOT FOUND
                80 | 183 => Some("already exists; pick a unique name"), // FILE_EXISTS / ALREADY_EXISTS
                112 => Some("insufficient disk space"),         // ERROR_DISK_FULL
                206 => Some("filename or path too long"),       // ERROR_FILENAME_EXCED_RANGE
                _ => None,
            };
            if hint.is_some() {
                return hint;
            }
        }
    }

    match e.kind() {
        io::ErrorKind::PermissionDenied => {
            Some("permission denied; check ownership and write permissions")
        }
        io::ErrorKind::NotFound => Some("path not found; verify it exists"),
        io::ErrorKind::AlreadyExists => Some("already exists; remove or choose a unique name"),
        _ => None,
    }
}

/// True when a rename failed only because source and target live on different filesystems.
pub fn is_cross_device(e: &io::Error) -> bool {
    // Detect EXDEV / ERROR_NOT_SAME_DEVICE via raw OS error codes.
    match e.raw_os_error() {
        #[cfg(unix)]
        Some(code) => code == libc::EXDEV,
        #[cfg(windows)]
        Some(code) => code == 17,
        #[cfg(not(any(unix, windows)))]
        Some(_) => false,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_fallback_hints() {
        let e = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        assert!(io_hint(&e).unwrap().contains("permission denied"));
        let e = io::Error::other("weird");
        assert!(io_hint(&e).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn exdev_is_cross_device() {
        let e = io::Error::from_raw_os_error(libc::EXDEV);
        assert!(is_cross_device(&e));
        assert!(io_hint(&e).unwrap().contains("cross-filesystem"));
        let e = io::Error::from_raw_os_error(libc::ENOENT);
        assert!(!is_cross_device(&e));
    }
}
