//! Core library for `clean_import`.
//!
//! One import pass lists the regular files directly inside a source
//! directory, replaces filesystem-unsafe characters in each name with `_`,
//! and moves each file into a destination directory (created if missing).
//!
//! - `fs_ops::list_files` / `try_list_files`: the Lister
//! - `sanitize::sanitize_file_name`: the Sanitizer
//! - `fs_ops::move_file` / `try_move_file`: the Mover
//! - `import::import_files` / `Importer`: the pass itself
//!
//! Events go to a caller-supplied `report::Reporter` rather than a global logger.

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod import;
pub mod output;
pub mod platform;
pub mod report;
pub mod sanitize;
pub mod shutdown;

pub use config::{
    Config, LogLevel, default_config_path, path_has_symlink_ancestor,
};
pub use errors::ImportError;
pub use fs_ops::{
    MoveOptions, OnDuplicate, list_files, move_file, try_list_files, try_move_file,
};
pub use import::{FileOutcome, FileStatus, ImportOptions, ImportSummary, Importer, import_files};
pub use report::{
    EventRecord, ImportEvent, NullReporter, RecordingReporter, Reporter, TracingReporter,
};
pub use sanitize::{sanitize_file_name, sanitize_os_name};
