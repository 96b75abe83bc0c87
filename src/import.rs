//! Import pass orchestration.
//!
//! One pass: list the source once, then for each file sanitize its name and
//! move it into the destination. A failure on one file never stops the pass;
//! files moved before a later failure stay moved.

use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::errors::ImportError;
use crate::fs_ops::{MoveOptions, OnDuplicate, report_move, try_list_files, try_move_file_claimed};
use crate::report::{ImportEvent, Reporter};
use crate::sanitize::sanitize_os_name;
use crate::shutdown;

/// Options for an import pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOptions {
    pub on_duplicate: OnDuplicate,
    pub dry_run: bool,
}

impl ImportOptions {
    fn move_options(&self) -> MoveOptions {
        MoveOptions {
            on_duplicate: self.on_duplicate,
            dry_run: self.dry_run,
        }
    }
}

/// What happened to a single listed file.
#[derive(Debug)]
pub enum FileStatus {
    /// Moved (or, in dry-run, would be moved) to `dest`.
    Moved { dest: PathBuf },
    Failed { error: ImportError },
    /// Left in place on purpose: unsanitizable name or destination conflict.
    Skipped { reason: ImportError },
}

#[derive(Debug)]
pub struct FileOutcome {
    pub source: PathBuf,
    pub status: FileStatus,
}

/// Result of one import pass.
#[derive(Debug, Default)]
pub struct ImportSummary {
    pub outcomes: Vec<FileOutcome>,
    /// Set when the source directory could not be listed.
    pub listing_error: Option<ImportError>,
    /// Set when a shutdown request stopped the pass early.
    pub interrupted: bool,
}

impl ImportSummary {
    pub fn moved(&self) -> usize {
        self.count(|s| matches!(s, FileStatus::Moved { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, FileStatus::Failed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, FileStatus::Skipped { .. }))
    }

    fn count(&self, pred: impl Fn(&FileStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.status)).count()
    }
}

/// Run one import pass from `source_dir` into `dest_dir`.
pub fn import_files(
    source_dir: &Path,
    dest_dir: &Path,
    opts: &ImportOptions,
    reporter: &dyn Reporter,
) -> ImportSummary {
    let mut summary = ImportSummary::default();

    let mut names: Vec<OsString> = match try_list_files(source_dir) {
        Ok(names) => names,
        Err(error) => {
            reporter.report(&ImportEvent::DirectoryReadFailed {
                dir: source_dir,
                error: &error,
            });
            summary.listing_error = Some(error);
            return summary;
        }
    };
    // Listing order is OS-defined; sort so reporting is deterministic.
    names.sort();
    debug!(count = names.len(), source = %source_dir.display(), "listed source files");

    let move_opts = opts.move_options();
    // Dry-run leaves the destination untouched, so remember what it would have filled.
    let mut planned: HashSet<PathBuf> = HashSet::new();
    let total = names.len();
    for (done, name) in names.into_iter().enumerate() {
        if shutdown::is_requested() {
            warn!(
                code = ImportError::Interrupted.code(),
                remaining = total - done,
                "Import interrupted"
            );
            summary.interrupted = true;
            break;
        }

        let src = source_dir.join(&name);
        let status = match sanitize_os_name(&name) {
            Err(reason) => {
                reporter.report(&ImportEvent::Skipped {
                    src: &src,
                    error: &reason,
                });
                FileStatus::Skipped { reason }
            }
            Ok(clean) => {
                let result = try_move_file_claimed(&src, dest_dir, &clean, &move_opts, &planned);
                report_move(&src, &result, &move_opts, reporter);
                if opts.dry_run
                    && let Ok(dest) = &result
                {
                    planned.insert(dest.clone());
                }
                match result {
                    Ok(dest) => FileStatus::Moved { dest },
                    Err(reason @ ImportError::DestinationExists { .. }) => {
                        FileStatus::Skipped { reason }
                    }
                    Err(error) => FileStatus::Failed { error },
                }
            }
        };
        summary.outcomes.push(FileOutcome { source: src, status });
    }

    info!(
        moved = summary.moved(),
        failed = summary.failed(),
        skipped = summary.skipped(),
        dry_run = opts.dry_run,
        "Import pass finished"
    );
    summary
}

/// Stateless service wrapper around `import_files`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Importer {
    opts: ImportOptions,
}

impl Importer {
    pub fn new(opts: ImportOptions) -> Self {
        Self { opts }
    }

    pub fn run(&self, source_dir: &Path, dest_dir: &Path, reporter: &dyn Reporter) -> ImportSummary {
        import_files(source_dir, dest_dir, &self.opts, reporter)
    }
}
