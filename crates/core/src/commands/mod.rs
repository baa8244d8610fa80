//! Administrative command surface
//!
//! One root command, `/firstspawn`, with permission-gated subcommands.
//!
//! # Architecture
//!
//! ```text
//! host command dispatch → CommandManager::dispatch → subcommand callback
//!                                ├─ no args: help filtered by permission
//!                                ├─ permission check (firstspawn.admin or firstspawn.<sub>)
//!                                ├─ unknown subcommand: usage error
//!                                └─ player-only check
//! ```
//!
//! # Example
//!
//! ```ignore
//! use firstspawn_core::commands::{CommandManager, CommandResult};
//!
//! let mut commands = CommandManager::new();
//! commands.register("ping", "Respond with pong", false, |info| {
//!     info.reply("Pong!");
//!     CommandResult::Handled
//! });
//!
//! commands.dispatch(sender, "firstspawn", &["ping"]);
//! ```

mod handlers;
mod info;
mod manager;

pub use handlers::register_default_commands;
pub use info::{CommandCallback, CommandInfo, CommandResult};
pub use manager::{CommandKey, CommandManager, ROOT_COMMAND};
