//! Public API for other plugins
//!
//! The plugin hands out an `Arc<dyn FirstSpawnApi>` through its service
//! lookup. Everything here goes through the same state and event bus the
//! join listener and commands use.
//!
//! # Example
//!
//! ```ignore
//! let api = plugin.api();
//!
//! api.events().on_post_teleport(|event| {
//!     if event.is_first_join() {
//!         give_starter_kit(event.player());
//!     }
//! });
//!
//! if api.first_spawn_location().is_none() {
//!     api.set_first_spawn_location(&lobby)?;
//! }
//! ```

use firstspawn_sdk::{Location, Player};

use crate::config::ConfigResult;
use crate::events::EventBus;
use crate::location::SpawnLocation;
use crate::service::{TeleportOptions, TeleportService};

/// Service interface exposed to collaborating plugins
pub trait FirstSpawnApi: Send + Sync {
    /// Configured spawn point, if set and its world is loaded
    fn first_spawn_location(&self) -> Option<SpawnLocation>;

    /// Replace and persist the spawn point
    fn set_first_spawn_location(&self, location: &Location) -> ConfigResult<()>;

    /// Teleport with the configured options. Returns whether it succeeded.
    fn teleport_to_first_spawn(&self, player: &dyn Player) -> bool;

    /// Teleport with explicit options. Returns whether it succeeded.
    fn teleport_to_first_spawn_with(&self, player: &dyn Player, options: TeleportOptions) -> bool;

    fn is_plugin_enabled(&self) -> bool;

    fn welcome_message(&self) -> String;

    /// Replace and persist the welcome message
    fn set_welcome_message(&self, message: &str) -> ConfigResult<()>;

    /// Register pre/post teleport observers
    fn events(&self) -> &EventBus;
}

impl FirstSpawnApi for TeleportService {
    fn first_spawn_location(&self) -> Option<SpawnLocation> {
        self.state().read().location().cloned()
    }

    fn set_first_spawn_location(&self, location: &Location) -> ConfigResult<()> {
        self.state().write().set_location(location).map(|_| ())
    }

    fn teleport_to_first_spawn(&self, player: &dyn Player) -> bool {
        let options = self.configured_options();
        self.teleport(player, options).succeeded()
    }

    fn teleport_to_first_spawn_with(&self, player: &dyn Player, options: TeleportOptions) -> bool {
        self.teleport(player, options).succeeded()
    }

    fn is_plugin_enabled(&self) -> bool {
        self.state().read().is_enabled()
    }

    fn welcome_message(&self) -> String {
        self.state().read().welcome_message().to_string()
    }

    fn set_welcome_message(&self, message: &str) -> ConfigResult<()> {
        self.state().write().set_welcome_message(message)
    }

    fn events(&self) -> &EventBus {
        TeleportService::events(self)
    }
}
