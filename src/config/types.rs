//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::{DEST_DIR_DEFAULT, SOURCE_DIR_DEFAULT};
use crate::fs_ops::OnDuplicate;
use crate::import::ImportOptions;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration for one import pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory scanned for files to import
    pub source_dir: PathBuf,
    /// Directory files are moved into; created if absent
    pub dest_dir: PathBuf,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// If true, report planned moves but do not modify the filesystem
    pub dry_run: bool,
    /// What to do when the cleaned name already exists in dest_dir
    pub on_duplicate: OnDuplicate,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(SOURCE_DIR_DEFAULT),
            dest_dir: PathBuf::from(DEST_DIR_DEFAULT),
            log_level: LogLevel::Normal,
            log_file: None,
            dry_run: false,
            on_duplicate: OnDuplicate::default(),
        }
    }
}

impl Config {
    /// Construct a Config with explicit directories; other fields use defaults.
    pub fn new(source_dir: impl Into<PathBuf>, dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
            ..Default::default()
        }
    }

    /// Options handed to the Importer.
    pub fn import_options(&self) -> ImportOptions {
        ImportOptions {
            on_duplicate: self.on_duplicate,
            dry_run: self.dry_run,
        }
    }
}
