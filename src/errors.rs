//! Typed error definitions for clean_import.
//! Provides the small set of failure modes an import pass can hit, for better logs and tests.

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("The specified path is not a directory or an I/O error occurred: {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot sanitize file name {name:?}: not valid UTF-8")]
    Sanitize { name: OsString },

    #[error("Failed to create destination directory {path}: {source}")]
    CreateDestination {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Destination already exists: {path}")]
    DestinationExists { path: PathBuf },

    #[error("Failed to move {src} -> {dest}: {source}")]
    Move {
        src: PathBuf,
        dest: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl ImportError {
    /// Stable numeric code for structured logs.
    pub fn code(&self) -> i32 {
        match self {
            ImportError::DirectoryRead { .. } => 10,
            ImportError::Sanitize { .. } => 20,
            ImportError::CreateDestination { .. } => 30,
            ImportError::DestinationExists { .. } => 31,
            ImportError::Move { .. } => 32,
            ImportError::Interrupted => 130,
        }
    }

    /// Short machine-friendly name, used as the `kind` log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ImportError::DirectoryRead { .. } => "directory_read",
            ImportError::Sanitize { .. } => "sanitize",
            ImportError::CreateDestination { .. } => "create_destination",
            ImportError::DestinationExists { .. } => "destination_exists",
            ImportError::Move { .. } => "move",
            ImportError::Interrupted => "interrupted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let errs = [
            ImportError::DirectoryRead {
                path: PathBuf::from("x"),
                source: io::Error::from(io::ErrorKind::NotFound),
            },
            ImportError::Sanitize { name: OsString::from("x") },
            ImportError::CreateDestination {
                path: PathBuf::from("x"),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            },
            ImportError::DestinationExists { path: PathBuf::from("x") },
            ImportError::Move {
                src: PathBuf::from("a"),
                dest: PathBuf::from("b"),
                source: io::Error::from(io::ErrorKind::NotFound),
            },
            ImportError::Interrupted,
        ];
        let mut codes: Vec<i32> = errs.iter().map(ImportError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errs.len());
    }

    #[test]
    fn directory_read_message_keeps_legacy_phrase() {
        let e = ImportError::DirectoryRead {
            path: PathBuf::from("missing"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(
            e.to_string()
                .contains("The specified path is not a directory or an I/O error occurred")
        );
        assert_eq!(e.kind(), "directory_read");
    }
}
