//! FirstSpawn SDK - Host Server Type Definitions
//!
//! This crate describes what the plugin needs from the game server it is
//! loaded into. It carries no logic and compiles quickly, allowing parallel
//! compilation of dependent crates.
//!
//! # Modules
//!
//! - [`location`] - World positions
//! - [`player`] - Online player handle
//! - [`sender`] - Command senders (players and console)
//! - [`server`] - World lookup, capabilities, HTTP
//! - [`scheduler`] - The two host scheduler families
//! - [`capabilities`] - Capability marker names

pub mod capabilities;
pub mod error;
pub mod location;
pub mod player;
pub mod scheduler;
pub mod sender;
pub mod server;

pub use error::HostError;
pub use location::Location;
pub use player::{Player, PlayerId};
pub use scheduler::{MainThreadScheduler, RegionizedScheduler, Rejected, Task};
pub use sender::CommandSender;
pub use server::Server;
