//! Import event reporting.
//!
//! Lister, Mover and Importer never log through a global handle directly; they
//! hand each discrete event to a `Reporter` passed in by the caller.
//! - `TracingReporter`: production sink, emits `tracing` events.
//! - `RecordingReporter`: keeps an owned copy of every event (tests, summaries).
//! - `NullReporter`: drops everything.
//!
//! Any `Fn(&ImportEvent)` closure is also a Reporter.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{error, info, warn};

use crate::errors::ImportError;

/// Literal phrase emitted for each successful move.
pub const MOVED_MESSAGE: &str = "File moved successfully.";
/// Literal phrase emitted for each failed move.
pub const MOVE_FAILED_MESSAGE: &str = "Failed to move the file.";

/// A discrete event raised during an import pass.
#[derive(Debug)]
pub enum ImportEvent<'a> {
    /// The source directory could not be listed.
    DirectoryReadFailed { dir: &'a Path, error: &'a ImportError },
    /// A file was relocated.
    Moved { src: &'a Path, dest: &'a Path },
    /// A file could not be relocated.
    MoveFailed { src: &'a Path, error: &'a ImportError },
    /// A file was deliberately left alone (bad name, destination conflict).
    Skipped { src: &'a Path, error: &'a ImportError },
    /// Dry-run: the move that would have happened.
    WouldMove { src: &'a Path, dest: &'a Path },
}

/// Sink for import events.
pub trait Reporter {
    fn report(&self, event: &ImportEvent<'_>);
}

impl<F> Reporter for F
where
    F: Fn(&ImportEvent<'_>),
{
    fn report(&self, event: &ImportEvent<'_>) {
        self(event)
    }
}

/// Emits every event through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: &ImportEvent<'_>) {
        match event {
            ImportEvent::DirectoryReadFailed { dir, error } => {
                error!(
                    code = error.code(),
                    kind = error.kind(),
                    dir = %dir.display(),
                    error = %error,
                    "The specified path is not a directory or an I/O error occurred."
                );
            }
            ImportEvent::Moved { src, dest } => {
                info!(src = %src.display(), dest = %dest.display(), "{}", MOVED_MESSAGE);
            }
            ImportEvent::MoveFailed { src, error } => {
                error!(
                    code = error.code(),
                    kind = error.kind(),
                    src = %src.display(),
                    error = %error,
                    "{}",
                    MOVE_FAILED_MESSAGE
                );
            }
            ImportEvent::Skipped { src, error } => {
                warn!(
                    code = error.code(),
                    kind = error.kind(),
                    src = %src.display(),
                    error = %error,
                    "Skipped file"
                );
            }
            ImportEvent::WouldMove { src, dest } => {
                info!(src = %src.display(), dest = %dest.display(), "dry-run: would move file");
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&self, _event: &ImportEvent<'_>) {}
}

/// Owned form of an `ImportEvent`, as kept by `RecordingReporter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventRecord {
    DirectoryReadFailed { dir: PathBuf, kind: &'static str },
    Moved { src: PathBuf, dest: PathBuf },
    MoveFailed { src: PathBuf, kind: &'static str, message: String },
    Skipped { src: PathBuf, kind: &'static str, message: String },
    WouldMove { src: PathBuf, dest: PathBuf },
}

impl From<&ImportEvent<'_>> for EventRecord {
    fn from(event: &ImportEvent<'_>) -> Self {
        match event {
            ImportEvent::DirectoryReadFailed { dir, error } => EventRecord::DirectoryReadFailed {
                dir: dir.to_path_buf(),
                kind: error.kind(),
            },
            ImportEvent::Moved { src, dest } => EventRecord::Moved {
                src: src.to_path_buf(),
                dest: dest.to_path_buf(),
            },
            ImportEvent::MoveFailed { src, error } => EventRecord::MoveFailed {
                src: src.to_path_buf(),
                kind: error.kind(),
                message: error.to_string(),
            },
            ImportEvent::Skipped { src, error } => EventRecord::Skipped {
                src: src.to_path_buf(),
                kind: error.kind(),
                message: error.to_string(),
            },
            ImportEvent::WouldMove { src, dest } => EventRecord::WouldMove {
                src: src.to_path_buf(),
                dest: dest.to_path_buf(),
            },
        }
    }
}

/// Collects events in arrival order.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<EventRecord>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<EventRecord> {
        self.events.lock().map(|v| v.clone()).unwrap_or_default()
    }

    pub fn moved_count(&self) -> usize {
        self.count(|e| matches!(e, EventRecord::Moved { .. }))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|e| matches!(e, EventRecord::MoveFailed { .. }))
    }

    pub fn has_directory_error(&self) -> bool {
        self.count(|e| matches!(e, EventRecord::DirectoryReadFailed { .. })) > 0
    }

    fn count(&self, pred: impl Fn(&EventRecord) -> bool) -> usize {
        self.events
            .lock()
            .map(|v| v.iter().filter(|e| pred(e)).count())
            .unwrap_or(0)
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: &ImportEvent<'_>) {
        if let Ok(mut v) = self.events.lock() {
            v.push(EventRecord::from(event));
        }
    }
}

/// Forward to two reporters (e.g. tracing plus a recorder).
pub struct Tee<'a, A: Reporter + ?Sized, B: Reporter + ?Sized>(pub &'a A, pub &'a B);

impl<A: Reporter + ?Sized, B: Reporter + ?Sized> Reporter for Tee<'_, A, B> {
    fn report(&self, event: &ImportEvent<'_>) {
        self.0.report(event);
        self.1.report(event);
    }
}
