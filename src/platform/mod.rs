//! Platform-specific helpers.
//! Hides OS differences (Unix/Windows) behind a uniform API so the rest of
//! the codebase can remain platform-agnostic.

#[cfg(unix)]
mod unix;
#[cfg(not(unix))]
mod windows;

#[cfg(unix)]
pub use unix::{open_log_file_secure_append, set_dir_mode_0700, write_new_file_0600};

#[cfg(not(unix))]
pub use windows::{open_log_file_secure_append, set_dir_mode_0700, write_new_file_0600};
