//! Host-side schedulers
//!
//! - [`TickScheduler`] - the main-thread scheduler every host has
//! - [`RegionScheduler`] - the extra scheduler set of a regionized host

mod region;
mod tick;

pub use region::{RegionKey, RegionScheduler};
pub use tick::{TickScheduler, TimerKey};
