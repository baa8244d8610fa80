//! Host event listeners
//!
//! The host forwards player joins to [`JoinListener::on_player_join`]. The
//! listener runs the teleport decision on the dispatching thread and, for
//! admins, schedules an update notice on the player's own scheduler a
//! couple of seconds later.

use std::sync::Arc;

use firstspawn_engine::{ticks_from_secs, Scheduler};
use firstspawn_sdk::Player;

use crate::service::{JoinOutcome, TeleportService};
use crate::update::UpdateChecker;

/// Delay before the update notice, so it is not buried in join messages
pub const UPDATE_NOTICE_DELAY_SECS: u64 = 2;

/// Reacts to players joining the server
pub struct JoinListener {
    service: Arc<TeleportService>,
    scheduler: Arc<dyn Scheduler>,
    updates: Option<Arc<UpdateChecker>>,
}

impl JoinListener {
    pub fn new(
        service: Arc<TeleportService>,
        scheduler: Arc<dyn Scheduler>,
        updates: Option<Arc<UpdateChecker>>,
    ) -> Self {
        Self {
            service,
            scheduler,
            updates,
        }
    }

    /// Handle one join notification
    pub fn on_player_join(&self, player: Arc<dyn Player>) -> JoinOutcome {
        let outcome = self.service.handle_join(player.as_ref());

        if let Some(updates) = &self.updates {
            if updates.available_update().is_some() {
                let updates = Arc::clone(updates);
                let owner = player.id();
                self.scheduler.run_later(
                    ticks_from_secs(UPDATE_NOTICE_DELAY_SECS),
                    Some(owner),
                    move || {
                        updates.notify_admin(player.as_ref());
                    },
                );
            }
        }

        outcome
    }
}
