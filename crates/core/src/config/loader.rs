//! Config path resolution
//!
//! The host hands every plugin a data directory. Each plugin keeps its files
//! in its own sub-directory named after the plugin.

use std::path::{Path, PathBuf};

/// File name of a plugin's config document
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory holding a plugin's files.
///
/// Path: `{base}/{plugin_name}/`
pub fn plugin_data_dir(base: &Path, plugin_name: &str) -> PathBuf {
    base.join(plugin_name)
}

/// Path of a plugin's config file.
///
/// Path: `{base}/{plugin_name}/config.toml`
pub fn plugin_config_path(base: &Path, plugin_name: &str) -> PathBuf {
    plugin_data_dir(base, plugin_name).join(CONFIG_FILE_NAME)
}
