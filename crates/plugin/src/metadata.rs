//! Plugin metadata shown by the host's plugin list

pub const NAME: &str = "FirstSpawn";
pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
