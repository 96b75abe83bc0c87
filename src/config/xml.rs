//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Writes a commented template on request (`--init-config`).
//!
//! Notes:
//! - This module only reads/writes the config file; directory validation happens elsewhere.
//! - Unknown XML fields are a hard error to surface misconfigurations early.

use anyhow::{Context, Result, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::{CONFIG_ENV_VAR, default_config_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel};
use super::{DEST_DIR_DEFAULT, SOURCE_DIR_DEFAULT};
use crate::fs_ops::OnDuplicate;
use crate::platform::{set_dir_mode_0700, write_new_file_0600};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    source_dir: Option<String>,
    dest_dir: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
    on_duplicate: Option<String>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    dry_run: Option<bool>,
}

// Custom deserializer that trims surrounding whitespace for optional bool
fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(Some(true)),
            "false" | "no" | "0" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!(
                "invalid boolean '{other}' for dry_run"
            ))),
        },
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

// Map XmlConfig -> Config, falling back to defaults for absent fields.
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(s) = non_empty(parsed.source_dir.as_deref()) {
        cfg.source_dir = PathBuf::from(s);
    }
    if let Some(s) = non_empty(parsed.dest_dir.as_deref()) {
        cfg.dest_dir = PathBuf::from(s);
    }
    cfg.log_file = non_empty(parsed.log_file.as_deref()).map(PathBuf::from);

    if let Some(s) = non_empty(parsed.log_level.as_deref()) {
        cfg.log_level = s.parse::<LogLevel>().map_err(anyhow::Error::msg)?;
    }
    if let Some(s) = non_empty(parsed.on_duplicate.as_deref()) {
        cfg.on_duplicate = s.parse::<OnDuplicate>().map_err(anyhow::Error::msg)?;
    }
    cfg.dry_run = parsed.dry_run.unwrap_or(false);

    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid value in config xml '{}'", path.display()))
}

/// Load the active config file.
///
/// - `$CLEAN_IMPORT_CONFIG` set: the file must exist and parse.
/// - Otherwise the OS default path is used; a missing file yields Ok(None).
pub fn load_config() -> Result<Option<(PathBuf, Config)>> {
    let explicit = env::var_os(CONFIG_ENV_VAR).is_some();
    let path = default_config_path()?;

    if !path.exists() {
        if explicit {
            bail!(
                "{CONFIG_ENV_VAR} points to a missing config file: {}",
                path.display()
            );
        }
        debug!(path = %path.display(), "no config file; using defaults");
        return Ok(None);
    }

    let cfg = load_config_from_xml_path(&path)?;
    debug!(path = %path.display(), "loaded config");
    Ok(Some((path, cfg)))
}

/// Write a commented template config at `path`. Refuses to overwrite.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("Config file already exists: {}", path.display());
    }
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config directory '{}'", parent.display()))?;
        let _ = set_dir_mode_0700(parent);
    }

    let content = format!(
        "<!--\n  clean_import configuration (XML)\n\n  Fields (all optional):\n    source_dir    -> directory scanned for files (non-recursive)\n    dest_dir      -> directory files are moved into (created if missing)\n    log_level     -> quiet | normal | info | debug\n    log_file      -> path to log file (optional; stdout still used)\n    on_duplicate  -> skip | overwrite | rename (when the cleaned name already exists)\n    dry_run       -> true/false; report moves without touching files\n\n  Notes:\n    - CLI flags and positional paths override XML values.\n-->\n<config>\n  <source_dir>{}</source_dir>\n  <dest_dir>{}</dest_dir>\n  <log_level>normal</log_level>\n  <log_file></log_file>\n  <on_duplicate>skip</on_duplicate>\n  <dry_run>false</dry_run>\n</config>\n",
        SOURCE_DIR_DEFAULT, DEST_DIR_DEFAULT,
    );

    write_new_file_0600(path, content.as_bytes())
        .with_context(|| format!("write config template '{}'", path.display()))?;
    info!("Created template config at {}", path.display());
    Ok(())
}
