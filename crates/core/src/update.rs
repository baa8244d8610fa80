//! Update checker
//!
//! Asks the plugin index for the newest published version of the plugin's
//! resource. The request runs off the simulation thread through
//! [`Scheduler::schedule_now`]; the result is cached and shown to joining
//! admins.
//!
//! Versions compare as dotted numeric segments. Anything after the first
//! non-digit in a segment is ignored, so `1.2.0-SNAPSHOT` compares as
//! `1.2.0`.

use std::cmp::Ordering;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Deserialize;

use firstspawn_engine::Scheduler;
use firstspawn_sdk::{HostError, Player, Server};

use crate::config::UpdateCheckerSection;
use crate::permissions::flags;
use crate::text::color;

/// Base of the plugin index API
pub const SPIGET_API: &str = "https://api.spiget.org/v2";

/// Update check errors
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    #[error("Request failed: {0}")]
    Request(#[from] HostError),

    #[error("Malformed response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The subset of the index's version object we read
#[derive(Debug, Deserialize)]
struct LatestVersion {
    name: String,
}

/// Endpoint returning the latest version of `resource_id`
pub fn latest_version_url(resource_id: u32) -> String {
    format!("{}/resources/{}/versions/latest", SPIGET_API, resource_id)
}

/// Whether `latest` is a higher version than `current`
pub fn is_newer(current: &str, latest: &str) -> bool {
    compare_versions(latest, current) == Ordering::Greater
}

fn compare_versions(a: &str, b: &str) -> Ordering {
    let a = version_segments(a);
    let b = version_segments(b);
    let len = a.len().max(b.len());

    for i in 0..len {
        let left = a.get(i).copied().unwrap_or(0);
        let right = b.get(i).copied().unwrap_or(0);
        match left.cmp(&right) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

fn version_segments(version: &str) -> Vec<u64> {
    version
        .trim()
        .trim_start_matches(['v', 'V'])
        .split('.')
        .map(|segment| {
            let digits: String = segment.chars().take_while(char::is_ascii_digit).collect();
            digits.parse().unwrap_or(0)
        })
        .collect()
}

/// Checks for and remembers newer releases
pub struct UpdateChecker {
    server: Arc<dyn Server>,
    scheduler: Arc<dyn Scheduler>,
    resource_id: u32,
    current_version: String,
    notify_admins: bool,
    latest: RwLock<Option<String>>,
}

impl UpdateChecker {
    pub fn new(
        server: Arc<dyn Server>,
        scheduler: Arc<dyn Scheduler>,
        current_version: impl Into<String>,
        settings: &UpdateCheckerSection,
    ) -> Arc<Self> {
        Arc::new(Self {
            server,
            scheduler,
            resource_id: settings.resource_id,
            current_version: current_version.into(),
            notify_admins: settings.notify_admins,
            latest: RwLock::new(None),
        })
    }

    pub fn resource_id(&self) -> u32 {
        self.resource_id
    }

    pub fn current_version(&self) -> &str {
        &self.current_version
    }

    /// Start a check in the background
    pub fn check_for_updates(self: &Arc<Self>) {
        let checker = Arc::clone(self);
        self.scheduler.run_async(move || checker.run_check());
    }

    /// Blocking fetch of the latest published version
    pub fn fetch_latest(&self) -> Result<String, UpdateError> {
        let body = self.server.http_get(&latest_version_url(self.resource_id))?;
        let latest: LatestVersion = serde_json::from_str(&body)?;
        Ok(latest.name)
    }

    fn run_check(&self) {
        match self.fetch_latest() {
            Ok(latest) if is_newer(&self.current_version, &latest) => {
                tracing::info!(
                    "A new version of FirstSpawn is available: {} (current: {})",
                    latest,
                    self.current_version
                );
                *self.latest.write() = Some(latest);
            }
            Ok(latest) => {
                tracing::info!("FirstSpawn is up to date ({})", self.current_version);
                tracing::debug!("Latest published version: {}", latest);
            }
            Err(e) => tracing::warn!("Failed to check for updates: {}", e),
        }
    }

    /// Newer version found by the last check, if any
    pub fn available_update(&self) -> Option<String> {
        self.latest.read().clone()
    }

    /// Tell `player` about an available update if they are an admin.
    ///
    /// Returns whether a notice was sent.
    pub fn notify_admin(&self, player: &dyn Player) -> bool {
        if !self.notify_admins || !player.has_permission(flags::ADMIN) {
            return false;
        }
        let Some(latest) = self.available_update() else {
            return false;
        };

        let notice = format!(
            "{}A new version of FirstSpawn is available: {}{} {}(current: {})",
            color::YELLOW,
            color::GREEN,
            latest,
            color::GRAY,
            self.current_version
        );
        match player.send_message(&notice) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!("Could not send update notice to {}: {}", player.name(), e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use firstspawn_engine::LegacyScheduler;
    use firstspawn_host::{MemoryPlayer, MemoryServer};
    use firstspawn_sdk::Location;

    fn checker(server: &Arc<MemoryServer>, current: &str) -> Arc<UpdateChecker> {
        let scheduler = Arc::new(LegacyScheduler::new(server.main_scheduler()));
        UpdateChecker::new(
            server.clone(),
            scheduler,
            current,
            &UpdateCheckerSection::default(),
        )
    }

    fn admin() -> MemoryPlayer {
        MemoryPlayer::new(1, "Op", Location::new("world", 0.0, 64.0, 0.0))
            .with_permissions(&[flags::ADMIN])
    }

    #[test]
    fn test_version_ordering() {
        assert!(is_newer("1.2.0", "1.2.1"));
        assert!(is_newer("1.2.0", "1.10"));
        assert!(is_newer("1.2", "1.2.0.1"));
        assert!(is_newer("1.2.0-SNAPSHOT", "v1.3"));
        assert!(!is_newer("1.2.0", "1.2"));
        assert!(!is_newer("1.2.0", "1.1.9"));
        assert!(!is_newer("2.0", "1.99.99"));
    }

    #[test]
    fn test_url() {
        assert_eq!(
            latest_version_url(122818),
            "https://api.spiget.org/v2/resources/122818/versions/latest"
        );
    }

    #[test]
    fn test_check_runs_async_and_caches() {
        let server = Arc::new(MemoryServer::new(&["world"]));
        server.set_http_response(
            &latest_version_url(122818),
            Ok(r#"{"id": 1, "name": "1.3.0", "releaseDate": 0}"#.to_string()),
        );
        let checker = checker(&server, "1.2.0");

        checker.check_for_updates();
        assert_eq!(checker.available_update(), None);
        assert_eq!(server.ticks().calls(), vec!["run_task_async"]);

        server.run_until_idle(5);
        assert_eq!(checker.available_update().as_deref(), Some("1.3.0"));

        let op = admin();
        assert!(checker.notify_admin(&op));
        assert!(op.messages()[0].contains("1.3.0"));

        let guest = MemoryPlayer::new(2, "Guest", Location::new("world", 0.0, 64.0, 0.0));
        assert!(!checker.notify_admin(&guest));
    }

    #[test]
    fn test_up_to_date_has_no_update() {
        let server = Arc::new(MemoryServer::new(&["world"]));
        server.set_http_response(&latest_version_url(122818), Ok(r#"{"name": "1.2.0"}"#.to_string()));
        let checker = checker(&server, "1.2.0");

        checker.check_for_updates();
        server.run_until_idle(5);

        assert_eq!(checker.available_update(), None);
        assert!(!checker.notify_admin(&admin()));
    }

    #[test]
    fn test_failures_are_reported() {
        let server = Arc::new(MemoryServer::new(&["world"]));
        let checker = checker(&server, "1.2.0");
        assert!(matches!(checker.fetch_latest(), Err(UpdateError::Request(_))));

        server.set_http_response(&latest_version_url(122818), Ok("not json".to_string()));
        assert!(matches!(checker.fetch_latest(), Err(UpdateError::Parse(_))));

        checker.check_for_updates();
        server.run_until_idle(5);
        assert_eq!(checker.available_update(), None);
    }
}
