//! Configuration store
//!
//! A trait-based config system over TOML files:
//! - Type-safe config structs via serde
//! - Default documents written on first load
//! - Explicit reload from disk
//!
//! The plugin's own document is [`FirstSpawnConfig`]. Its key names match
//! the ones administrators already know (`welcome-message`,
//! `[firstSpawn]`, `[update-checker]`).
//!
//! # Example
//!
//! ```ignore
//! use firstspawn_core::config::{FirstSpawnConfig, PluginConfig};
//!
//! let config = FirstSpawnConfig::load(data_dir)?;
//! if config.enabled {
//!     // ...
//! }
//! ```

mod loader;

use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};

use crate::location::SpawnLocation;

pub use loader::{plugin_config_path, plugin_data_dir, CONFIG_FILE_NAME};

/// Configuration system errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read or write config file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML content
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config to TOML
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// The file on disk could not be loaded, so writing would replace it
    /// with defaults
    #[error("{0:?} could not be loaded; fix it and reload before making changes")]
    NotLoaded(PathBuf),
}

/// Result type for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Trait for plugin configuration documents.
///
/// # File Location
///
/// `{base}/{PLUGIN_NAME}/config.toml`, where `base` is the data directory
/// the host gives to plugins.
pub trait PluginConfig: Default + Serialize + DeserializeOwned + Send + Sync {
    /// Directory name under the host's data directory
    const PLUGIN_NAME: &'static str;

    /// Load config from file, creating default if missing.
    fn load(base: &Path) -> ConfigResult<Self> {
        let path = plugin_config_path(base, Self::PLUGIN_NAME);

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Self = toml::from_str(&content)?;
            tracing::debug!("Loaded config for {} from {:?}", Self::PLUGIN_NAME, path);
            Ok(config)
        } else {
            let default = Self::default();
            default.save(base)?;
            tracing::info!(
                "Created default config for {} at {:?}",
                Self::PLUGIN_NAME,
                path
            );
            Ok(default)
        }
    }

    /// Save config to file.
    ///
    /// The document is written to a sibling temp file and renamed over the
    /// old one, so a reader never sees a half-written file.
    fn save(&self, base: &Path) -> ConfigResult<()> {
        let path = plugin_config_path(base, Self::PLUGIN_NAME);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        let staging = path.with_extension("toml.tmp");
        std::fs::write(&staging, content)?;
        std::fs::rename(&staging, &path)?;
        tracing::debug!("Saved config for {} to {:?}", Self::PLUGIN_NAME, path);
        Ok(())
    }

    /// Reload config from file.
    ///
    /// On error `self` is left as it was.
    fn reload(&mut self, base: &Path) -> ConfigResult<()> {
        let path = plugin_config_path(base, Self::PLUGIN_NAME);
        let content = std::fs::read_to_string(&path)?;
        *self = toml::from_str(&content)?;
        tracing::debug!("Reloaded config for {} from {:?}", Self::PLUGIN_NAME, path);
        Ok(())
    }
}

/// Persisted plugin configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirstSpawnConfig {
    /// Master switch for first-join teleports
    pub enabled: bool,

    /// Verbose logging
    pub debug: bool,

    /// Sent to players after the teleport; `&` color codes allowed
    #[serde(rename = "welcome-message")]
    pub welcome_message: String,

    #[serde(rename = "firstSpawn")]
    pub first_spawn: FirstSpawnSection,

    #[serde(rename = "update-checker")]
    pub update_checker: UpdateCheckerSection,
}

impl Default for FirstSpawnConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debug: false,
            welcome_message: String::new(),
            first_spawn: FirstSpawnSection::default(),
            update_checker: UpdateCheckerSection::default(),
        }
    }
}

impl PluginConfig for FirstSpawnConfig {
    const PLUGIN_NAME: &'static str = "firstspawn";
}

/// `[firstSpawn]` table. Coordinates are optional until an admin runs `set`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FirstSpawnSection {
    pub set_bed_spawn: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub world: Option<String>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_coordinate"
    )]
    pub x: Option<f64>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_coordinate"
    )]
    pub y: Option<f64>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_coordinate"
    )]
    pub z: Option<f64>,

    /// NORTH, EAST, SOUTH, WEST or empty
    pub direction: String,
}

impl Default for FirstSpawnSection {
    fn default() -> Self {
        Self {
            set_bed_spawn: true,
            world: None,
            x: None,
            y: None,
            z: None,
            direction: String::new(),
        }
    }
}

impl FirstSpawnSection {
    /// Overwrite every location key
    pub fn set_location(&mut self, location: &SpawnLocation) {
        self.world = Some(location.world.clone());
        self.x = Some(location.x);
        self.y = Some(location.y);
        self.z = Some(location.z);
        self.direction = location
            .facing
            .map(|d| d.as_str().to_string())
            .unwrap_or_default();
    }

    /// Whether any location key is present
    pub fn has_location(&self) -> bool {
        self.world.is_some() || self.x.is_some() || self.y.is_some() || self.z.is_some()
    }
}

/// Read a coordinate, dropping anything that is not a number.
///
/// A bad coordinate only unsets the spawn location instead of failing the
/// whole document.
fn lenient_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<toml::Value>::deserialize(deserializer)? {
        Some(toml::Value::Float(value)) => Some(value),
        Some(toml::Value::Integer(value)) => Some(value as f64),
        Some(other) => {
            tracing::warn!("Ignoring spawn coordinate {}: not a number", other);
            None
        }
        None => None,
    })
}

/// `[update-checker]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UpdateCheckerSection {
    pub enabled: bool,
    pub resource_id: u32,
    pub notify_admins: bool,
}

impl Default for UpdateCheckerSection {
    fn default() -> Self {
        Self {
            enabled: true,
            resource_id: 122818,
            notify_admins: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;

    #[test]
    fn test_defaults() {
        let config = FirstSpawnConfig::default();
        assert!(config.enabled);
        assert!(!config.debug);
        assert!(config.welcome_message.is_empty());
        assert!(config.first_spawn.set_bed_spawn);
        assert!(!config.first_spawn.has_location());
        assert_eq!(config.update_checker.resource_id, 122818);
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let config: FirstSpawnConfig = toml::from_str("debug = true\n").unwrap();
        assert!(config.enabled);
        assert!(config.debug);
        assert!(config.first_spawn.set_bed_spawn);
        assert!(config.update_checker.notify_admins);
    }

    #[test]
    fn test_key_names() {
        let mut config = FirstSpawnConfig {
            welcome_message: "&aHi".to_string(),
            ..Default::default()
        };
        config.first_spawn.set_location(&SpawnLocation::new(
            "world",
            0.5,
            64.0,
            0.5,
            Some(Direction::North),
        ));

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("welcome-message = \"&aHi\""));
        assert!(toml_str.contains("[firstSpawn]"));
        assert!(toml_str.contains("set-bed-spawn = true"));
        assert!(toml_str.contains("direction = \"NORTH\""));
        assert!(toml_str.contains("[update-checker]"));
        assert!(toml_str.contains("resource-id = 122818"));

        let parsed: FirstSpawnConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_non_numeric_coordinate_only_drops_that_key() {
        let config: FirstSpawnConfig = toml::from_str(
            r#"
enabled = false
welcome-message = "&aHi"

[firstSpawn]
set-bed-spawn = false
world = "world"
x = "ten"
y = 64
z = 0.5
"#,
        )
        .unwrap();

        assert!(!config.enabled);
        assert_eq!(config.welcome_message, "&aHi");
        assert!(!config.first_spawn.set_bed_spawn);
        assert_eq!(config.first_spawn.x, None);
        assert_eq!(config.first_spawn.y, Some(64.0));
        assert_eq!(config.first_spawn.z, Some(0.5));
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();

        let config = FirstSpawnConfig::load(dir.path()).unwrap();
        assert_eq!(config, FirstSpawnConfig::default());
        assert!(plugin_config_path(dir.path(), "firstspawn").exists());
    }

    #[test]
    fn test_save_then_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = FirstSpawnConfig::load(dir.path()).unwrap();

        let mut saved = config.clone();
        saved.enabled = false;
        saved.save(dir.path()).unwrap();
        assert!(config.enabled);

        config.reload(dir.path()).unwrap();
        assert!(!config.enabled);
        assert!(!dir.path().join("firstspawn").join("config.toml.tmp").exists());
    }

    #[test]
    fn test_reload_parse_error_keeps_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = FirstSpawnConfig::load(dir.path()).unwrap();
        config.debug = true;

        std::fs::write(plugin_config_path(dir.path(), "firstspawn"), "enabled = [").unwrap();
        let err = config.reload(dir.path()).unwrap_err();

        assert!(matches!(err, ConfigError::ParseError(_)));
        assert!(config.debug);
    }
}
