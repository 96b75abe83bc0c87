//! Duplicate-name resolution.
//!
//! Policy:
//! - Skip: leave the source alone when the target name is taken (default).
//! - Overwrite: replace the existing target.
//! - RenameWithSuffix: pick a free name by appending " (n)" before the extension.
//!
//! Notes:
//! - This only decides the path from current filesystem state. The pass is
//!   single-threaded, so nothing else in this process races the check.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnDuplicate {
    /// Keep the existing destination file and do not move the source.
    #[default]
    Skip,
    /// Use the requested name and overwrite if it already exists.
    Overwrite,
    /// Pick a unique name by appending " (n)" before the extension.
    RenameWithSuffix,
}

impl OnDuplicate {
    /// Parse `skip|overwrite|rename` (case-insensitive, a few aliases).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" | "keep" => Some(OnDuplicate::Skip),
            "overwrite" | "replace" => Some(OnDuplicate::Overwrite),
            "rename" | "suffix" | "rename_with_suffix" => Some(OnDuplicate::RenameWithSuffix),
            _ => None,
        }
    }
}

impl fmt::Display for OnDuplicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OnDuplicate::Skip => "skip",
            OnDuplicate::Overwrite => "overwrite",
            OnDuplicate::RenameWithSuffix => "rename",
        })
    }
}

impl FromStr for OnDuplicate {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid duplicate policy: '{s}' (expected skip, overwrite or rename)"))
    }
}

/// Compute the destination path for `name` inside `dst_dir` under `policy`.
///
/// For Skip/Overwrite this is simply `dst_dir/name`; the caller decides what
/// to do if it exists. For RenameWithSuffix a free name is returned
/// (`name`, `name (2)`, `name (3)`, ...).
///
/// A name counts as taken if anything occupies it, including a dangling symlink.
pub fn resolve_destination(dst_dir: &Path, name: &OsStr, policy: OnDuplicate) -> PathBuf {
    resolve_destination_with(dst_dir, name, policy, &is_occupied)
}

pub(crate) fn is_occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Same as `resolve_destination`, with the occupancy test supplied by the caller.
pub(crate) fn resolve_destination_with(
    dst_dir: &Path,
    name: &OsStr,
    policy: OnDuplicate,
    taken: &dyn Fn(&Path) -> bool,
) -> PathBuf {
    let candidate = dst_dir.join(name);

    match policy {
        OnDuplicate::Skip | OnDuplicate::Overwrite => candidate,
        OnDuplicate::RenameWithSuffix => {
            if !taken(candidate.as_path()) {
                return candidate;
            }
            unique_with_numeric_suffix(dst_dir, name, taken)
        }
    }
}

/// Examples:
/// - "movie.mkv" -> "movie (2).mkv", "movie (3).mkv", ...
/// - ".env" -> ".env (2)"
/// - "archive.tar.gz" -> "archive.tar (2).gz"
fn unique_with_numeric_suffix(dst_dir: &Path, name: &OsStr, taken: &dyn Fn(&Path) -> bool) -> PathBuf {
    let base = Path::new(name);
    let stem: OsString = base
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from(name));
    let ext: Option<OsString> = base.extension().map(|e| e.to_os_string());

    const MAX_TRIES: u64 = 10_000;
    for n in 2..=MAX_TRIES {
        let new_name = build_name_with_suffix(&stem, ext.as_deref(), &format!(" ({n})"));
        let candidate = dst_dir.join(&new_name);
        if !taken(candidate.as_path()) {
            return candidate;
        }
        if n == 4 {
            trace!(name = ?name, dir = %dst_dir.display(), "duplicate: multiple collisions, still searching");
        }
    }
    dst_dir.join(build_name_with_suffix(&stem, ext.as_deref(), " (final)"))
}

#[cfg(windows)]
const MAX_FILENAME_LEN: usize = 240; // leave headroom for legacy MAX_PATH
#[cfg(not(windows))]
const MAX_FILENAME_LEN: usize = 255; // typical POSIX/EXT limits

#[cfg(unix)]
fn name_len_units(s: &OsStr) -> usize {
    use std::os::unix::ffi::OsStrExt;
    s.as_bytes().len()
}

#[cfg(not(unix))]
fn name_len_units(s: &OsStr) -> usize {
    s.to_string_lossy().len()
}

/// Truncate the stem if needed so `stem + suffix + ["." + ext]` fits MAX_FILENAME_LEN.
fn build_name_with_suffix(stem: &OsStr, ext: Option<&OsStr>, suffix: &str) -> OsString {
    let mut overhead = suffix.len();
    let mut ext_part = OsString::new();
    if let Some(e) = ext {
        overhead = overhead.saturating_add(1 + name_len_units(e));
        ext_part.push(".");
        ext_part.push(e);
    }

    let mut stem_os = stem.to_os_string();
    if name_len_units(&stem_os) + overhead > MAX_FILENAME_LEN {
        let budget = MAX_FILENAME_LEN.saturating_sub(overhead).max(1);
        // Names reaching here were sanitized from UTF-8, so lossy is exact.
        let s = stem.to_string_lossy();
        let mut acc = String::new();
        for ch in s.chars() {
            if acc.len() + ch.len_utf8() > budget {
                break;
            }
            acc.push(ch);
        }
        if acc.is_empty() {
            acc.push('f');
        }
        stem_os = OsString::from(acc);
    }

    let mut new_name = stem_os;
    new_name.push(suffix);
    new_name.push(&ext_part);
    new_name
}
