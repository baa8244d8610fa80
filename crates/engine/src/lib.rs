//! FirstSpawn Engine - Capability Probing and Scheduler Selection
//!
//! This crate handles:
//! - Probing the host once at startup for the regionized runtime
//! - Selecting one of two scheduler strategies behind the [`Scheduler`] trait
//! - Falling back to the main-thread scheduler when a regionized call is refused
//!
//! # Architecture
//!
//! [`select_scheduler`] inspects the host's capability markers and returns
//! either a [`LegacyScheduler`] or a [`RegionizedStrategy`]. The plugin holds
//! the returned `Arc<dyn Scheduler>` for its lifetime; no reflection or
//! re-probing happens afterwards.

pub mod error;
pub mod probe;
pub mod scheduler;
pub mod ticks;

pub use error::ProbeError;
pub use probe::{probe_regionized, select_scheduler};
pub use scheduler::{LegacyScheduler, Platform, RegionizedStrategy, Scheduler};
pub use ticks::{ticks_from_secs, TICKS_PER_SECOND};
