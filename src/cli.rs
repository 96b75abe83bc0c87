//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - --source-dir / --dest-dir take precedence over the positional SOURCE / DEST.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::{Path, PathBuf};

use crate::config::types::{Config, LogLevel};
use crate::fs_ops::OnDuplicate;

/// Move every file from a source folder into a destination folder,
/// replacing characters that are unsafe in filenames (< > : " / \ | ? *) with '_'.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Source directory (positional).
    #[arg(value_name = "SOURCE", value_hint = ValueHint::DirPath)]
    pub source_pos: Option<PathBuf>,

    /// Destination directory (positional).
    #[arg(value_name = "DEST", value_hint = ValueHint::DirPath)]
    pub dest_pos: Option<PathBuf>,

    /// Source directory; overrides the positional SOURCE.
    #[arg(
        long,
        short = 's',
        value_name = "DIR",
        value_hint = ValueHint::DirPath,
        help = "Directory to import from (default: input)"
    )]
    pub source_dir: Option<PathBuf>,

    /// Destination directory; overrides the positional DEST.
    #[arg(
        long,
        short = 't',
        value_name = "DIR",
        value_hint = ValueHint::DirPath,
        help = "Directory to import into, created if missing (default: import)"
    )]
    pub dest_dir: Option<PathBuf>,

    /// What to do when the cleaned name already exists in the destination.
    #[arg(long, value_name = "POLICY", help = "On name conflict: skip, overwrite or rename")]
    pub on_duplicate: Option<OnDuplicate>,

    /// Dry-run: report actions but do not modify the filesystem.
    #[arg(long, help = "Show what would be done, but do not move files or create directories")]
    pub dry_run: bool,

    /// Exit with status 1 if any file failed to move.
    #[arg(long, help = "Exit non-zero if any file failed to move")]
    pub strict: bool,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, help = "Enable debug logging (shorthand for --log-level debug)")]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Also write logs to this file.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Print which config file is used (or CLEAN_IMPORT_CONFIG if set), then exit.
    #[arg(long, help = "Print the config file location and exit")]
    pub print_config: bool,

    /// Write a template config file at the config location, then exit.
    #[arg(long, help = "Write a template config file and exit")]
    pub init_config: bool,
}

impl Args {
    /// Effective source: `--source-dir`, else positional SOURCE.
    pub fn resolved_source(&self) -> Option<PathBuf> {
        self.source_dir
            .as_deref()
            .or(self.source_pos.as_deref())
            .map(Self::sanitize_path)
    }

    /// Effective destination: `--dest-dir`, else positional DEST.
    pub fn resolved_dest(&self) -> Option<PathBuf> {
        self.dest_dir
            .as_deref()
            .or(self.dest_pos.as_deref())
            .map(Self::sanitize_path)
    }

    #[inline]
    fn sanitize_path(p: &Path) -> PathBuf {
        Self::sanitize_str(&p.to_string_lossy())
    }

    /// Trim surrounding quotes left behind by PowerShell/CMD quoting, and one
    /// trailing separator (but never the root itself).
    fn sanitize_str(s: &str) -> PathBuf {
        let trimmed = s.trim();
        let mut inner = if trimmed.len() >= 2
            && ((trimmed.starts_with('"') && trimmed.ends_with('"'))
                || (trimmed.starts_with('\'') && trimmed.ends_with('\'')))
        {
            trimmed[1..trimmed.len() - 1].to_string()
        } else {
            trimmed.trim_matches(|c| c == '\'' || c == '"').to_string()
        };

        if (inner.ends_with('\\') || inner.ends_with('/')) && inner.len() > 1 && !inner.ends_with(":\\") {
            inner.pop();
        }

        PathBuf::from(inner)
    }

    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(src) = self.resolved_source() {
            cfg.source_dir = src;
        }
        if let Some(dst) = self.resolved_dest() {
            cfg.dest_dir = dst;
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
        if let Some(policy) = self.on_duplicate {
            cfg.on_duplicate = policy;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_and_trailing_slash_are_trimmed() {
        assert_eq!(Args::sanitize_str("'/tmp/in/'"), PathBuf::from("/tmp/in"));
        assert_eq!(Args::sanitize_str("\"C:\\data\\in\\\""), PathBuf::from("C:\\data\\in"));
        assert_eq!(Args::sanitize_str("/"), PathBuf::from("/"));
        assert_eq!(Args::sanitize_str("C:\\"), PathBuf::from("C:\\"));
    }
}
