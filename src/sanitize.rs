//! Filename sanitization.
//!
//! Replaces characters that are reserved on common filesystems (Windows in
//! particular) with `_`, one for one. Everything else, including whitespace,
//! dots and non-ASCII text, passes through unchanged.

use std::ffi::OsStr;

use crate::errors::ImportError;

/// Characters rewritten by `sanitize_file_name`.
pub const FORBIDDEN_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Replacement for every forbidden character.
pub const REPLACEMENT: char = '_';

#[inline]
fn is_forbidden(c: char) -> bool {
    FORBIDDEN_CHARS.contains(&c)
}

/// Return a filesystem-safe copy of `name`.
///
/// Length is preserved (in chars and in bytes) since both the forbidden set
/// and the replacement are ASCII.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if is_forbidden(c) { REPLACEMENT } else { c })
        .collect()
}

/// True when `name` contains no forbidden character.
pub fn is_clean(name: &str) -> bool {
    !name.chars().any(is_forbidden)
}

/// Sanitize a name as returned by the OS.
///
/// Names that are not valid UTF-8 are rejected rather than converted lossily;
/// the caller should skip the file.
pub fn sanitize_os_name(name: &OsStr) -> Result<String, ImportError> {
    name.to_str()
        .map(sanitize_file_name)
        .ok_or_else(|| ImportError::Sanitize {
            name: name.to_os_string(),
        })
}
