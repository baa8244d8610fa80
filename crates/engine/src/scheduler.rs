//! Scheduler shim
//!
//! One narrow interface, two strategies. The strategy is picked once at
//! startup (see [`crate::probe::select_scheduler`]); after that every call
//! goes straight to the host API it wraps. Hand-off is fire-and-forget: the
//! shim keeps no queue, no timers and no handles.
//!
//! When a regionized call is refused the task is re-submitted to the
//! main-thread scheduler instead of failing the caller.

use std::fmt;
use std::sync::Arc;

use firstspawn_sdk::{Location, MainThreadScheduler, PlayerId, RegionizedScheduler, Rejected, Task};

/// Which host scheduling API is in use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Single main thread
    Legacy,
    /// Independently ticked regions
    Regionized,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => write!(f, "legacy"),
            Self::Regionized => write!(f, "regionized"),
        }
    }
}

/// Deferred-work interface used by the plugin
pub trait Scheduler: Send + Sync {
    /// Strategy in use
    fn platform(&self) -> Platform;

    /// Run `task` off the simulation thread as soon as possible
    fn schedule_now(&self, task: Task);

    /// Run `task` after `delay_ticks`.
    ///
    /// With an `owner` the task follows that player on regionized hosts;
    /// otherwise it runs on the global region.
    fn schedule_delayed(&self, task: Task, delay_ticks: u64, owner: Option<PlayerId>);

    /// Run `task` on the thread that owns `location`
    fn schedule_at(&self, location: &Location, task: Task);
}

impl dyn Scheduler {
    /// Whether the regionized strategy is active
    pub fn is_regionized(&self) -> bool {
        self.platform() == Platform::Regionized
    }

    /// [`Scheduler::schedule_now`] taking a closure
    pub fn run_async<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.schedule_now(Box::new(f));
    }

    /// [`Scheduler::schedule_delayed`] taking a closure
    pub fn run_later<F>(&self, delay_ticks: u64, owner: Option<PlayerId>, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.schedule_delayed(Box::new(f), delay_ticks, owner);
    }
}

/// Log a task nobody would take
fn drop_rejected(api: &str, rejected: Rejected) {
    tracing::error!("{} refused task, dropping it: {}", api, rejected.reason);
}

/// Strategy for hosts with only the main-thread scheduler
pub struct LegacyScheduler {
    main: Arc<dyn MainThreadScheduler>,
}

impl LegacyScheduler {
    pub fn new(main: Arc<dyn MainThreadScheduler>) -> Self {
        Self { main }
    }
}

impl Scheduler for LegacyScheduler {
    fn platform(&self) -> Platform {
        Platform::Legacy
    }

    fn schedule_now(&self, task: Task) {
        if let Err(rejected) = self.main.run_task_async(task) {
            drop_rejected("Main scheduler (async)", rejected);
        }
    }

    fn schedule_delayed(&self, task: Task, delay_ticks: u64, _owner: Option<PlayerId>) {
        if let Err(rejected) = self.main.run_task_later(task, delay_ticks) {
            drop_rejected("Main scheduler (delayed)", rejected);
        }
    }

    fn schedule_at(&self, _location: &Location, task: Task) {
        if let Err(rejected) = self.main.run_task(task) {
            drop_rejected("Main scheduler", rejected);
        }
    }
}

/// Strategy for regionized hosts, falling back to the main-thread scheduler
/// per call
pub struct RegionizedStrategy {
    regions: Arc<dyn RegionizedScheduler>,
    fallback: LegacyScheduler,
}

impl RegionizedStrategy {
    pub fn new(regions: Arc<dyn RegionizedScheduler>, main: Arc<dyn MainThreadScheduler>) -> Self {
        Self {
            regions,
            fallback: LegacyScheduler::new(main),
        }
    }
}

impl Scheduler for RegionizedStrategy {
    fn platform(&self) -> Platform {
        Platform::Regionized
    }

    fn schedule_now(&self, task: Task) {
        if let Err(rejected) = self.regions.run_async_now(task) {
            tracing::warn!(
                "Failed to use regionized async scheduler, falling back to main scheduler: {}",
                rejected.reason
            );
            self.fallback.schedule_now(rejected.task);
        }
    }

    fn schedule_delayed(&self, task: Task, delay_ticks: u64, owner: Option<PlayerId>) {
        let result = match owner {
            Some(entity) => self.regions.run_entity_delayed(entity, task, delay_ticks),
            None => self.regions.run_global_delayed(task, delay_ticks),
        };
        if let Err(rejected) = result {
            tracing::warn!(
                "Failed to use regionized {} scheduler, falling back to main scheduler: {}",
                if owner.is_some() { "entity" } else { "global" },
                rejected.reason
            );
            self.fallback.schedule_delayed(rejected.task, delay_ticks, owner);
        }
    }

    fn schedule_at(&self, location: &Location, task: Task) {
        if let Err(rejected) = self.regions.run_at_location(location, task) {
            tracing::warn!(
                "Failed to use regionized region scheduler, falling back to main scheduler: {}",
                rejected.reason
            );
            self.fallback.schedule_at(location, rejected.task);
        }
    }
}
