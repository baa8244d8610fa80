//! In-process server

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;

use firstspawn_sdk::capabilities::REGIONIZED_MARKERS;
use firstspawn_sdk::{HostError, MainThreadScheduler, RegionizedScheduler, Server};

use crate::scheduler::{RegionScheduler, TickScheduler};

/// A server with a set of loaded worlds, advertised capabilities, a
/// tick-driven main scheduler and, when regionized, a region scheduler.
pub struct MemoryServer {
    name: String,
    worlds: RwLock<HashSet<String>>,
    capabilities: RwLock<HashSet<String>>,
    main: Arc<TickScheduler>,
    regions: Option<Arc<RegionScheduler>>,
    http: RwLock<HashMap<String, Result<String, HostError>>>,
}

impl MemoryServer {
    /// Single-threaded server with the given worlds loaded
    pub fn new(worlds: &[&str]) -> Self {
        Self {
            name: "MemoryServer".to_string(),
            worlds: RwLock::new(worlds.iter().map(|w| (*w).to_string()).collect()),
            capabilities: RwLock::new(HashSet::new()),
            main: Arc::new(TickScheduler::new()),
            regions: None,
            http: RwLock::new(HashMap::new()),
        }
    }

    /// Regionized server advertising every regionized capability marker
    pub fn regionized(worlds: &[&str]) -> Self {
        let mut server = Self::new(worlds);
        server.name = "MemoryServer (regionized)".to_string();
        server.regions = Some(Arc::new(RegionScheduler::new()));
        {
            let mut caps = server.capabilities.write();
            for marker in REGIONIZED_MARKERS {
                caps.insert((*marker).to_string());
            }
        }
        server
    }

    /// Advertise a capability marker
    pub fn add_capability(&self, marker: &str) {
        self.capabilities.write().insert(marker.to_string());
    }

    /// Withdraw a capability marker
    pub fn remove_capability(&self, marker: &str) {
        self.capabilities.write().remove(marker);
    }

    pub fn load_world(&self, world: &str) {
        self.worlds.write().insert(world.to_string());
    }

    pub fn unload_world(&self, world: &str) {
        self.worlds.write().remove(world);
    }

    /// Canned reply for `http_get(url)`
    pub fn set_http_response(&self, url: &str, response: Result<String, HostError>) {
        self.http.write().insert(url.to_string(), response);
    }

    /// The main-thread scheduler
    pub fn ticks(&self) -> &Arc<TickScheduler> {
        &self.main
    }

    /// The region scheduler, on regionized servers
    pub fn regions(&self) -> Option<&Arc<RegionScheduler>> {
        self.regions.as_ref()
    }

    /// Advance every scheduler by one tick. Returns tasks executed.
    pub fn tick(&self) -> usize {
        let mut count = self.main.tick();
        if let Some(regions) = &self.regions {
            count += regions.tick();
        }
        count
    }

    /// Tick until both schedulers are idle or `max_ticks` is reached
    pub fn run_until_idle(&self, max_ticks: u64) -> usize {
        let mut total = 0;
        for _ in 0..max_ticks {
            let pending = self.main.pending()
                + self.regions.as_ref().map(|r| r.pending()).unwrap_or(0);
            if pending == 0 {
                break;
            }
            total += self.tick();
        }
        total
    }
}

impl Server for MemoryServer {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_world_loaded(&self, world: &str) -> bool {
        self.worlds.read().contains(world)
    }

    fn has_capability(&self, marker: &str) -> bool {
        self.capabilities.read().contains(marker)
    }

    fn main_scheduler(&self) -> Arc<dyn MainThreadScheduler> {
        self.main.clone()
    }

    fn regionized_scheduler(&self) -> Option<Arc<dyn RegionizedScheduler>> {
        self.regions
            .as_ref()
            .map(|r| Arc::clone(r) as Arc<dyn RegionizedScheduler>)
    }

    fn http_get(&self, url: &str) -> Result<String, HostError> {
        self.http
            .read()
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(HostError::Http(format!("no route to {}", url))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use firstspawn_sdk::capabilities::REGIONIZED_SERVER;

    #[test]
    fn test_worlds() {
        let server = MemoryServer::new(&["world"]);
        assert!(server.is_world_loaded("world"));
        assert!(!server.is_world_loaded("world_nether"));

        server.load_world("world_nether");
        server.unload_world("world");
        assert!(server.is_world_loaded("world_nether"));
        assert!(!server.is_world_loaded("world"));
    }

    #[test]
    fn test_regionized_capabilities() {
        let plain = MemoryServer::new(&["world"]);
        assert!(!plain.has_capability(REGIONIZED_SERVER));
        assert!(plain.regionized_scheduler().is_none());

        let regionized = MemoryServer::regionized(&["world"]);
        assert!(regionized.has_capability(REGIONIZED_SERVER));
        assert!(regionized.regionized_scheduler().is_some());
    }

    #[test]
    fn test_http_routes() {
        let server = MemoryServer::new(&[]);
        server.set_http_response("https://example.test/v", Ok("{}".to_string()));

        assert_eq!(server.http_get("https://example.test/v").unwrap(), "{}");
        assert!(matches!(
            server.http_get("https://example.test/other"),
            Err(HostError::Http(_))
        ));
    }
}
