//! FirstSpawn plugin
//!
//! Sends players to a configured location the first time they join a
//! server, optionally setting their respawn point and greeting them.
//!
//! The host creates one [`FirstSpawnPlugin`] with [`FirstSpawnPlugin::enable`]
//! and forwards joins, commands and tab completion to it. Other plugins get
//! the [`FirstSpawnApi`] from [`FirstSpawnPlugin::api`].
//!
//! # Example
//!
//! ```ignore
//! let plugin = FirstSpawnPlugin::enable(server, "plugins")?;
//!
//! // host event glue
//! plugin.on_player_join(player);
//! plugin.on_command(sender, "firstspawn", &["status"]);
//!
//! plugin.disable();
//! ```

pub mod logging;
pub mod metadata;
mod plugin;

pub use firstspawn_core::FirstSpawnApi;
pub use plugin::{FirstSpawnPlugin, PluginError};
