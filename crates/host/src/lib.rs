//! FirstSpawn Host - In-Process Reference Server
//!
//! Implements the SDK traits without a real game server so the plugin can
//! be embedded in tools and exercised deterministically in tests.
//!
//! Scheduled work never runs on its own: call [`MemoryServer::tick`] to
//! advance the main-thread and region schedulers.

pub mod console;
pub mod player;
pub mod scheduler;
pub mod server;

pub use console::ConsoleSender;
pub use player::MemoryPlayer;
pub use scheduler::{RegionKey, RegionScheduler, TickScheduler};
pub use server::MemoryServer;
