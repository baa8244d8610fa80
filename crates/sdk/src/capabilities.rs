//! Capability marker names probed at startup
//!
//! A host advertises the runtime features it provides through
//! `Server::has_capability`. These names must match exactly what the host
//! registers.

/// The host runs a regionized (multi-threaded) world
pub const REGIONIZED_SERVER: &str = "threadedregions.RegionizedServer";

/// Async scheduler of the regionized API
pub const ASYNC_SCHEDULER: &str = "threadedregions.scheduler.AsyncScheduler";

/// Global region scheduler
pub const GLOBAL_REGION_SCHEDULER: &str = "threadedregions.scheduler.GlobalRegionScheduler";

/// Location-scoped region scheduler
pub const REGION_SCHEDULER: &str = "threadedregions.scheduler.RegionScheduler";

/// Entity-scoped scheduler
pub const ENTITY_SCHEDULER: &str = "threadedregions.scheduler.EntityScheduler";

/// Markers that must all be present to use the regionized API
pub const REGIONIZED_MARKERS: &[&str] = &[
    REGIONIZED_SERVER,
    ASYNC_SCHEDULER,
    GLOBAL_REGION_SCHEDULER,
    REGION_SCHEDULER,
    ENTITY_SCHEDULER,
];
