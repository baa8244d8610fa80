//! The server the plugin is loaded into

use std::sync::Arc;

use crate::error::HostError;
use crate::scheduler::{MainThreadScheduler, RegionizedScheduler};

/// Host services the plugin consumes
pub trait Server: Send + Sync {
    /// Server software name, for logging
    fn name(&self) -> &str;

    /// Whether `world` is currently loaded
    fn is_world_loaded(&self, world: &str) -> bool;

    /// Whether the runtime provides the feature named by `marker`
    /// (see [`crate::capabilities`])
    fn has_capability(&self, marker: &str) -> bool;

    /// The traditional main-thread scheduler
    fn main_scheduler(&self) -> Arc<dyn MainThreadScheduler>;

    /// The regionized scheduler set, on hosts that have one
    fn regionized_scheduler(&self) -> Option<Arc<dyn RegionizedScheduler>>;

    /// Blocking HTTP GET returning the response body.
    ///
    /// Only called from async tasks.
    fn http_get(&self, url: &str) -> Result<String, HostError>;
}
