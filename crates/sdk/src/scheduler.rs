//! Host scheduling APIs
//!
//! Two families exist. Every host offers the [`MainThreadScheduler`]. Hosts
//! that split the world into independently ticked regions additionally offer
//! the [`RegionizedScheduler`], and on those hosts work that touches a player
//! or a location must go through it.
//!
//! Delays are in server ticks (20 per second).

use std::fmt;

use crate::location::Location;
use crate::player::PlayerId;

/// Unit of deferred work handed to the host
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// A task the host refused to schedule, handed back to the caller
pub struct Rejected {
    /// The task, not run
    pub task: Task,
    /// Why the host refused it
    pub reason: String,
}

impl Rejected {
    pub fn new(task: Task, reason: impl Into<String>) -> Self {
        Self {
            task,
            reason: reason.into(),
        }
    }
}

impl fmt::Debug for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rejected")
            .field("reason", &self.reason)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task rejected: {}", self.reason)
    }
}

/// Single main-thread scheduler available on every host
pub trait MainThreadScheduler: Send + Sync {
    /// Run on the main thread on the next tick
    fn run_task(&self, task: Task) -> Result<(), Rejected>;

    /// Run on the main thread after `delay_ticks`
    fn run_task_later(&self, task: Task, delay_ticks: u64) -> Result<(), Rejected>;

    /// Run off the main thread
    fn run_task_async(&self, task: Task) -> Result<(), Rejected>;
}

/// Region-aware schedulers of a multi-threaded host
pub trait RegionizedScheduler: Send + Sync {
    /// Run immediately on the async pool
    fn run_async_now(&self, task: Task) -> Result<(), Rejected>;

    /// Run on the global region after `delay_ticks`
    fn run_global_delayed(&self, task: Task, delay_ticks: u64) -> Result<(), Rejected>;

    /// Run on whichever region owns `entity` after `delay_ticks`.
    ///
    /// Rejected when the entity is no longer tracked.
    fn run_entity_delayed(
        &self,
        entity: PlayerId,
        task: Task,
        delay_ticks: u64,
    ) -> Result<(), Rejected>;

    /// Run on the region owning `location` on its next tick
    fn run_at_location(&self, location: &Location, task: Task) -> Result<(), Rejected>;
}
