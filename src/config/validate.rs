//! Config validation logic.
//!
//! Only rejects setups where a pass cannot do anything sensible. A missing or
//! unreadable source directory is NOT an error here: the import pass reports
//! it and processes nothing.

use anyhow::{Result, bail};
use std::fs;
use tracing::{debug, error, warn};

use super::types::Config;

impl Config {
    /// Validate the destination and the source/destination relationship.
    pub fn validate(&self) -> Result<()> {
        let src = &self.source_dir;
        let dst = &self.dest_dir;

        if src.as_os_str().is_empty() || dst.as_os_str().is_empty() {
            bail!("source_dir and dest_dir must not be empty");
        }

        // Destination: may be missing (created on first move), but if present must be a directory.
        if dst.exists() && !dst.is_dir() {
            error!("dest_dir exists but isn't a directory: {}", dst.display());
            bail!("dest_dir exists but isn't a directory: {}", dst.display());
        }

        if !src.is_dir() {
            warn!(
                "source_dir is not an existing directory: {}; nothing will be imported",
                src.display()
            );
        }

        // Resolve symlinks and make sure the pass would not move files onto themselves.
        if let (Ok(src_real), Ok(dst_real)) = (fs::canonicalize(src), fs::canonicalize(dst))
            && src_real == dst_real
        {
            bail!(
                "source_dir and dest_dir resolve to the same path: '{}'",
                src_real.display()
            );
        }

        debug!(
            "Config validated: source='{}' dest='{}' on_duplicate={} dry_run={}",
            src.display(),
            dst.display(),
            self.on_duplicate,
            self.dry_run
        );
        Ok(())
    }
}
