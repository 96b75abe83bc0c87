//! Default path helpers and symlink checks.
//! Determines the OS-appropriate config path and detects symlinked ancestors for safety.

use anyhow::{Result, anyhow};
use dirs::config_dir;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "CLEAN_IMPORT_CONFIG";

/// Config file path: `$CLEAN_IMPORT_CONFIG` if set, else the OS config dir.
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(p) = env::var_os(CONFIG_ENV_VAR) {
        let p = PathBuf::from(p);
        // A relative override is taken relative to the current directory.
        return if p.is_absolute() {
            Ok(p)
        } else {
            Ok(env::current_dir()?.join(p))
        };
    }
    if let Some(base) = config_dir() {
        return Ok(base.join("clean_import").join("config.xml"));
    }
    env::var_os("HOME")
        .map(|h| PathBuf::from(h).join(".config").join("clean_import").join("config.xml"))
        .ok_or_else(|| anyhow!("cannot determine a config directory (no config dir and no HOME)"))
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn plain_tempdir_has_no_symlink_ancestor_below_it() {
        let td = tempdir().unwrap();
        let base = fs::canonicalize(td.path()).unwrap();
        let nested = base.join("a").join("b.log");
        assert!(!path_has_symlink_ancestor(&nested).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn detects_symlinked_parent() {
        let td = tempdir().unwrap();
        let base = fs::canonicalize(td.path()).unwrap();
        let real = base.join("real");
        fs::create_dir(&real).unwrap();
        let link = base.join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();
        assert!(path_has_symlink_ancestor(&link.join("x.log")).unwrap());
    }
}
