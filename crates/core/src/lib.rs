//! FirstSpawn - Core Logic
//!
//! Everything the plugin decides lives here, independent of how it is
//! loaded into a server:
//!
//! - [`direction`] - yaw to cardinal label codec
//! - [`state`] - persisted configuration and its resolved view
//! - [`service`] - the per-join teleport decision
//! - [`events`] - pre/post teleport observers
//! - [`api`] - the interface handed to other plugins
//! - [`commands`] - `/firstspawn` and its subcommands
//! - [`listeners`] - player join handling
//! - [`update`] - update checker
//!
//! # Re-exports
//!
//! This crate re-exports the SDK and engine crates for convenience:
//! - [`sdk`] - Host types and traits
//! - [`engine`] - Scheduler shim

pub use firstspawn_engine as engine;
pub use firstspawn_sdk as sdk;

pub mod api;
pub mod commands;
pub mod config;
pub mod direction;
pub mod events;
pub mod listeners;
pub mod location;
pub mod permissions;
pub mod service;
pub mod state;
pub mod text;
pub mod update;

// Re-export commonly used items
pub use api::FirstSpawnApi;
pub use commands::{register_default_commands, CommandInfo, CommandKey, CommandManager, CommandResult};
pub use config::{ConfigError, ConfigResult, FirstSpawnConfig, PluginConfig};
pub use direction::{angle_from_label, label_from_angle, Direction, InvalidDirection};
pub use events::{EventBus, ListenerKey, PlayerFirstSpawnEvent, PlayerFirstSpawnedEvent};
pub use listeners::JoinListener;
pub use location::SpawnLocation;
pub use service::{Decision, JoinOutcome, SkipReason, TeleportOptions, TeleportService};
pub use state::{SharedState, SpawnConfig, SpawnState};
pub use text::{format_location, format_location_raw, translate_color_codes};
pub use update::{UpdateChecker, UpdateError};
