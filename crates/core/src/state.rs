//! Spawn state
//!
//! [`SpawnState`] owns the persisted document and the resolved runtime view
//! ([`SpawnConfig`]) derived from it. Every mutation writes the whole
//! document to disk first and only then updates memory, so a failed write
//! leaves both disk and memory at the previous value.
//!
//! The state is shared as [`SharedState`] between the teleport service, the
//! command handlers and the public API. It is constructed once by the plugin
//! and passed in explicitly.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use firstspawn_sdk::{Location, Server};

use crate::config::{
    plugin_config_path, ConfigError, ConfigResult, FirstSpawnConfig, FirstSpawnSection, PluginConfig,
    UpdateCheckerSection,
};
use crate::direction::Direction;
use crate::location::SpawnLocation;
use crate::text::format_location_raw;

/// State handle shared across the plugin
pub type SharedState = Arc<RwLock<SpawnState>>;

/// Called with the new value whenever the debug flag changes
pub type DebugHook = Box<dyn Fn(bool) + Send + Sync>;

/// Resolved runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnConfig {
    pub enabled: bool,
    pub debug: bool,
    pub welcome_message: String,
    pub set_bed_spawn: bool,
    /// `None` when unset, malformed or in a world that is not loaded
    pub location: Option<SpawnLocation>,
}

impl SpawnConfig {
    /// Resolve a persisted document against the worlds loaded on `server`
    pub fn resolve(document: &FirstSpawnConfig, server: &dyn Server) -> Self {
        Self {
            enabled: document.enabled,
            debug: document.debug,
            welcome_message: document.welcome_message.clone(),
            set_bed_spawn: document.first_spawn.set_bed_spawn,
            location: resolve_location(&document.first_spawn, server),
        }
    }
}

/// Build the spawn location from the `[firstSpawn]` table.
///
/// Problems degrade to `None` with a warning; the document is not touched
/// so an administrator can fix the file or run `set` again.
fn resolve_location(section: &FirstSpawnSection, server: &dyn Server) -> Option<SpawnLocation> {
    if !section.has_location() {
        return None;
    }

    let Some(world) = section.world.as_deref().filter(|w| !w.is_empty()) else {
        tracing::warn!("Spawn location has coordinates but no world; ignoring it");
        return None;
    };

    let (Some(x), Some(y), Some(z)) = (section.x, section.y, section.z) else {
        tracing::warn!("Spawn location in world '{}' is missing coordinates; ignoring it", world);
        return None;
    };
    if !(x.is_finite() && y.is_finite() && z.is_finite()) {
        tracing::warn!("Spawn location in world '{}' has malformed coordinates; ignoring it", world);
        return None;
    }

    if !server.is_world_loaded(world) {
        tracing::warn!(
            "World '{}' not found! First spawn location will not be set.",
            world
        );
        return None;
    }

    let facing = if section.direction.is_empty() {
        None
    } else {
        match section.direction.parse::<Direction>() {
            Ok(direction) => Some(direction),
            Err(e) => {
                tracing::debug!("{}", e);
                None
            }
        }
    };

    let location = SpawnLocation::new(world, x, y, z, facing);
    tracing::debug!("Loaded spawn location: {}", format_location_raw(Some(&location)));
    Some(location)
}

/// Persisted configuration plus its resolved view
pub struct SpawnState {
    base_dir: PathBuf,
    server: Arc<dyn Server>,
    document: FirstSpawnConfig,
    config: SpawnConfig,
    debug_hook: Option<DebugHook>,
    /// False while running on defaults because the file failed to load
    file_loaded: bool,
}

impl SpawnState {
    /// Load from `{base_dir}/firstspawn/config.toml`.
    ///
    /// Never fails: a missing file is created with defaults, an unreadable
    /// one is reported and defaults are used in memory. Mutations are then
    /// refused until a [`reload`](Self::reload) succeeds, so the file is
    /// never overwritten with those defaults.
    pub fn load(base_dir: impl Into<PathBuf>, server: Arc<dyn Server>) -> Self {
        let base_dir = base_dir.into();
        let (document, file_loaded) = match FirstSpawnConfig::load(&base_dir) {
            Ok(document) => (document, true),
            Err(e) => {
                tracing::warn!("Failed to load configuration, using defaults: {}", e);
                (FirstSpawnConfig::default(), false)
            }
        };
        let config = SpawnConfig::resolve(&document, server.as_ref());

        Self {
            base_dir,
            server,
            document,
            config,
            debug_hook: None,
            file_loaded,
        }
    }

    /// Wrap for sharing
    pub fn into_shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }

    pub fn config(&self) -> &SpawnConfig {
        &self.config
    }

    pub fn document(&self) -> &FirstSpawnConfig {
        &self.document
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn config_path(&self) -> PathBuf {
        plugin_config_path(&self.base_dir, FirstSpawnConfig::PLUGIN_NAME)
    }

    pub fn location(&self) -> Option<&SpawnLocation> {
        self.config.location.as_ref()
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn is_debug(&self) -> bool {
        self.config.debug
    }

    pub fn welcome_message(&self) -> &str {
        &self.config.welcome_message
    }

    pub fn set_bed_spawn(&self) -> bool {
        self.config.set_bed_spawn
    }

    pub fn update_checker(&self) -> &UpdateCheckerSection {
        &self.document.update_checker
    }

    /// Install the debug-flag observer. It is not called for the current value.
    pub fn set_debug_hook(&mut self, hook: DebugHook) {
        self.debug_hook = Some(hook);
    }

    /// Replace the spawn point with `location`, deriving the facing from its yaw
    pub fn set_location(&mut self, location: &Location) -> ConfigResult<SpawnLocation> {
        let spawn = SpawnLocation::from_location(location);
        self.set_spawn_location(spawn.clone())?;
        Ok(spawn)
    }

    /// Replace the spawn point wholesale
    pub fn set_spawn_location(&mut self, spawn: SpawnLocation) -> ConfigResult<()> {
        self.persist(|doc| doc.first_spawn.set_location(&spawn))?;
        tracing::info!("First spawn location set to {}", spawn);
        Ok(())
    }

    pub fn set_enabled(&mut self, enabled: bool) -> ConfigResult<()> {
        self.persist(|doc| doc.enabled = enabled)
    }

    /// Flip `enabled`, returning the new value
    pub fn toggle_enabled(&mut self) -> ConfigResult<bool> {
        let enabled = !self.document.enabled;
        self.set_enabled(enabled)?;
        Ok(enabled)
    }

    pub fn set_debug(&mut self, debug: bool) -> ConfigResult<()> {
        self.persist(|doc| doc.debug = debug)
    }

    /// Flip `debug`, returning the new value
    pub fn toggle_debug(&mut self) -> ConfigResult<bool> {
        let debug = !self.document.debug;
        self.set_debug(debug)?;
        Ok(debug)
    }

    pub fn set_welcome_message(&mut self, message: impl Into<String>) -> ConfigResult<()> {
        let message = message.into();
        self.persist(|doc| doc.welcome_message = message)
    }

    pub fn set_set_bed_spawn(&mut self, set_bed_spawn: bool) -> ConfigResult<()> {
        self.persist(|doc| doc.first_spawn.set_bed_spawn = set_bed_spawn)
    }

    /// Re-read the file, discarding anything not persisted.
    ///
    /// On error memory is left untouched.
    pub fn reload(&mut self) -> ConfigResult<()> {
        let mut document = self.document.clone();
        document.reload(&self.base_dir)?;
        self.file_loaded = true;
        self.replace_document(document);
        tracing::info!("Configuration reloaded");
        Ok(())
    }

    /// Write a modified copy of the document, then adopt it
    fn persist<F>(&mut self, mutate: F) -> ConfigResult<()>
    where
        F: FnOnce(&mut FirstSpawnConfig),
    {
        if !self.file_loaded {
            return Err(ConfigError::NotLoaded(self.config_path()));
        }
        let mut next = self.document.clone();
        mutate(&mut next);
        next.save(&self.base_dir)?;
        self.replace_document(next);
        Ok(())
    }

    fn replace_document(&mut self, document: FirstSpawnConfig) {
        let was_debug = self.config.debug;
        self.config = SpawnConfig::resolve(&document, self.server.as_ref());
        self.document = document;

        if self.config.debug != was_debug {
            if let Some(hook) = &self.debug_hook {
                hook(self.config.debug);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    use firstspawn_host::MemoryServer;

    fn server() -> Arc<MemoryServer> {
        Arc::new(MemoryServer::new(&["world", "lobby"]))
    }

    fn write_config(dir: &Path, content: &str) {
        let path = plugin_config_path(dir, "firstspawn");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_load_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let state = SpawnState::load(dir.path(), server());

        assert!(state.is_enabled());
        assert!(!state.is_debug());
        assert_eq!(state.welcome_message(), "");
        assert!(state.set_bed_spawn());
        assert!(state.location().is_none());
        assert!(state.config_path().exists());
    }

    #[test]
    fn test_load_existing_location() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
welcome-message = "&aWelcome!"

[firstSpawn]
set-bed-spawn = false
world = "lobby"
x = 1.5
y = 70.0
z = -8.5
direction = "EAST"
"#,
        );

        let state = SpawnState::load(dir.path(), server());
        assert_eq!(
            state.location(),
            Some(&SpawnLocation::new("lobby", 1.5, 70.0, -8.5, Some(Direction::East)))
        );
        assert!(!state.set_bed_spawn());
        assert_eq!(state.welcome_message(), "&aWelcome!");
    }

    #[test]
    fn test_unknown_world_degrades_to_unset() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            "[firstSpawn]\nworld = \"nether\"\nx = 0.0\ny = 64.0\nz = 0.0\n",
        );

        let state = SpawnState::load(dir.path(), server());
        assert!(state.location().is_none());
        // The persisted value is kept for the administrator to fix
        assert_eq!(state.document().first_spawn.world.as_deref(), Some("nether"));
    }

    #[test]
    fn test_missing_coordinate_degrades_to_unset() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "[firstSpawn]\nworld = \"world\"\nx = 0.0\nz = 0.0\n");

        let state = SpawnState::load(dir.path(), server());
        assert!(state.location().is_none());
    }

    #[test]
    fn test_invalid_direction_means_no_facing() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            "[firstSpawn]\nworld = \"world\"\nx = 0.0\ny = 64.0\nz = 0.0\ndirection = \"UP\"\n",
        );

        let state = SpawnState::load(dir.path(), server());
        assert_eq!(state.location().map(|l| l.facing), Some(None));
    }

    #[test]
    fn test_malformed_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "enabled = \"yes\"\n");

        let state = SpawnState::load(dir.path(), server());
        assert!(state.is_enabled());
        // The broken file is left for the administrator
        let content = std::fs::read_to_string(state.config_path()).unwrap();
        assert_eq!(content, "enabled = \"yes\"\n");
    }

    #[test]
    fn test_malformed_file_is_not_overwritten_until_reload() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "enabled = \"yes\"\nwelcome-message = \"&aHi\"\n");

        let mut state = SpawnState::load(dir.path(), server());
        let err = state.toggle_debug().unwrap_err();
        assert!(matches!(err, ConfigError::NotLoaded(_)));
        assert!(!state.is_debug());
        let content = std::fs::read_to_string(state.config_path()).unwrap();
        assert!(content.contains("welcome-message = \"&aHi\""));

        write_config(dir.path(), "enabled = false\nwelcome-message = \"&aHi\"\n");
        state.reload().unwrap();
        assert!(state.toggle_debug().unwrap());

        let on_disk = FirstSpawnConfig::load(dir.path()).unwrap();
        assert!(!on_disk.enabled);
        assert!(on_disk.debug);
        assert_eq!(on_disk.welcome_message, "&aHi");
    }

    #[test]
    fn test_bad_coordinate_keeps_other_settings() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
enabled = false
welcome-message = "&aHi"

[firstSpawn]
set-bed-spawn = false
world = "world"
x = "ten"
y = 64.0
z = 0.0

[update-checker]
enabled = false
"#,
        );

        let mut state = SpawnState::load(dir.path(), server());
        assert!(state.location().is_none());
        assert!(!state.is_enabled());
        assert_eq!(state.welcome_message(), "&aHi");
        assert!(!state.set_bed_spawn());
        assert!(!state.update_checker().enabled);

        state.toggle_debug().unwrap();
        let on_disk = FirstSpawnConfig::load(dir.path()).unwrap();
        assert!(!on_disk.enabled);
        assert!(on_disk.debug);
        assert_eq!(on_disk.welcome_message, "&aHi");
        assert!(!on_disk.first_spawn.set_bed_spawn);
        assert!(!on_disk.update_checker.enabled);
        assert_eq!(on_disk.first_spawn.world.as_deref(), Some("world"));
    }

    #[test]
    fn test_set_location_persists_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = SpawnState::load(dir.path(), server());

        let loc = Location::new("world", 10.0, 65.0, 20.0).with_rotation(-90.0, 12.0);
        let spawn = state.set_location(&loc).unwrap();
        assert_eq!(spawn.facing, Some(Direction::East));
        assert_eq!(state.location(), Some(&spawn));

        let on_disk = FirstSpawnConfig::load(dir.path()).unwrap();
        assert_eq!(on_disk.first_spawn.world.as_deref(), Some("world"));
        assert_eq!(on_disk.first_spawn.x, Some(10.0));
        assert_eq!(on_disk.first_spawn.direction, "EAST");
    }

    #[test]
    fn test_set_then_reload_reflects_persisted_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = SpawnState::load(dir.path(), server());

        let spawn = state
            .set_location(&Location::new("lobby", 1.0, 2.0, 3.0).with_rotation(180.0, 0.0))
            .unwrap();
        state.reload().unwrap();

        assert_eq!(state.location(), Some(&spawn));
    }

    #[test]
    fn test_reload_discards_memory_only_changes() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = SpawnState::load(dir.path(), server());
        state.set_welcome_message("first").unwrap();

        // Another writer changes the file behind our back
        let mut external = FirstSpawnConfig::load(dir.path()).unwrap();
        external.welcome_message = "second".to_string();
        external.save(dir.path()).unwrap();
        assert_eq!(state.welcome_message(), "first");

        state.reload().unwrap();
        assert_eq!(state.welcome_message(), "second");
    }

    #[test]
    fn test_reload_error_keeps_memory() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = SpawnState::load(dir.path(), server());
        state.set_enabled(false).unwrap();

        write_config(dir.path(), "enabled = [");
        assert!(state.reload().is_err());
        assert!(!state.is_enabled());
    }

    #[test]
    fn test_toggles_return_new_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = SpawnState::load(dir.path(), server());

        assert!(!state.toggle_enabled().unwrap());
        assert!(state.toggle_enabled().unwrap());
        assert!(state.toggle_debug().unwrap());
        assert!(state.is_debug());

        state.set_set_bed_spawn(false).unwrap();
        let on_disk = FirstSpawnConfig::load(dir.path()).unwrap();
        assert!(on_disk.debug);
        assert!(!on_disk.first_spawn.set_bed_spawn);
    }

    #[test]
    fn test_failed_write_leaves_memory_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = SpawnState::load(dir.path(), server());

        // Replace the config directory with a plain file so writes fail
        let data_dir = dir.path().join("firstspawn");
        std::fs::remove_dir_all(&data_dir).unwrap();
        std::fs::write(&data_dir, "").unwrap();

        assert!(state.set_welcome_message("hello").is_err());
        assert_eq!(state.welcome_message(), "");
    }

    #[test]
    fn test_debug_hook_fires_on_change_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = SpawnState::load(dir.path(), server());
        let seen = Arc::new(AtomicBool::new(false));
        let calls = Arc::new(std::sync::atomic::AtomicUsize::new(0));

        let seen_hook = Arc::clone(&seen);
        let calls_hook = Arc::clone(&calls);
        state.set_debug_hook(Box::new(move |debug| {
            seen_hook.store(debug, Ordering::SeqCst);
            calls_hook.fetch_add(1, Ordering::SeqCst);
        }));

        state.set_enabled(false).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        state.toggle_debug().unwrap();
        assert!(seen.load(Ordering::SeqCst));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        state.set_debug(true).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
