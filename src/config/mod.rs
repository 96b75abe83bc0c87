//! Config module.
//! Provides configuration types, default paths, XML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{CONFIG_ENV_VAR, default_config_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{create_template_config, load_config, load_config_from_xml_path};

/// Default source directory (relative to the working directory).
pub const SOURCE_DIR_DEFAULT: &str = "input";
/// Default destination directory (relative to the working directory).
pub const DEST_DIR_DEFAULT: &str = "import";
