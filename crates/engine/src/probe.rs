//! Start-time capability probe

use std::sync::Arc;

use firstspawn_sdk::capabilities::REGIONIZED_MARKERS;
use firstspawn_sdk::{RegionizedScheduler, Server};

use crate::error::ProbeError;
use crate::scheduler::{LegacyScheduler, RegionizedStrategy, Scheduler};

/// Check that every regionized marker is advertised and fetch the
/// region scheduler.
#[tracing::instrument(skip_all)]
pub fn probe_regionized(server: &dyn Server) -> Result<Arc<dyn RegionizedScheduler>, ProbeError> {
    for marker in REGIONIZED_MARKERS {
        if !server.has_capability(marker) {
            tracing::debug!("{}: not available", marker);
            return Err(ProbeError::MissingCapability(marker));
        }
        tracing::debug!("{}: available", marker);
    }

    server
        .regionized_scheduler()
        .ok_or(ProbeError::SchedulerUnavailable)
}

/// Pick the scheduler strategy for this host.
///
/// Never fails: any probe error selects the main-thread strategy.
#[tracing::instrument(skip_all)]
pub fn select_scheduler(server: &dyn Server) -> Arc<dyn Scheduler> {
    let main = server.main_scheduler();

    match probe_regionized(server) {
        Ok(regions) => {
            tracing::info!("{}: using regionized schedulers", server.name());
            Arc::new(RegionizedStrategy::new(regions, main))
        }
        Err(ProbeError::MissingCapability(marker)) if marker == REGIONIZED_MARKERS[0] => {
            tracing::info!("{}: using main-thread scheduler", server.name());
            Arc::new(LegacyScheduler::new(main))
        }
        Err(e) => {
            tracing::warn!(
                "{}: regionized runtime detected but unusable ({}), using main-thread scheduler",
                server.name(),
                e
            );
            Arc::new(LegacyScheduler::new(main))
        }
    }
}
