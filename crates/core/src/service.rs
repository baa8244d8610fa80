//! Teleport decision service
//!
//! One decision per call, terminal in one step:
//!
//! ```text
//! Evaluating ──► Skipped    disabled / returning player / no location
//!            ├─► Cancelled  a pre-teleport observer vetoed
//!            ├─► Completed  relocated, optional bed spawn and welcome
//!            └─► Failed     a host call failed along the way
//! ```
//!
//! Host failures are caught per step and folded into the [`JoinOutcome`].
//! The steps after relocation are independent and best-effort: a failed
//! bed spawn does not undo the teleport or suppress the welcome message.

use std::sync::Arc;

use bitflags::bitflags;

use firstspawn_sdk::{Player, Server};

use crate::events::{EventBus, PlayerFirstSpawnEvent, PlayerFirstSpawnedEvent};
use crate::location::SpawnLocation;
use crate::state::{SharedState, SpawnConfig};
use crate::text::translate_color_codes;

bitflags! {
    /// Optional steps after relocation
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TeleportOptions: u8 {
        /// Make the spawn point the player's respawn point
        const SET_BED_SPAWN = 0x01;
        /// Send the configured welcome message, if any
        const SEND_WELCOME = 0x02;
    }
}

/// Why nothing happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Disabled,
    ReturningPlayer,
    NoLocation,
}

/// Terminal state of one decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Skipped(SkipReason),
    Cancelled,
    Completed,
    Failed,
}

/// Result of one decision, handed back to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    pub decision: Decision,
    pub teleported: bool,
    pub bed_spawn_set: bool,
    pub message_sent: bool,
    pub cancel_reason: Option<String>,
}

impl JoinOutcome {
    fn new(decision: Decision) -> Self {
        Self {
            decision,
            teleported: false,
            bed_spawn_set: false,
            message_sent: false,
            cancel_reason: None,
        }
    }

    pub fn skipped(reason: SkipReason) -> Self {
        Self::new(Decision::Skipped(reason))
    }

    pub fn cancelled(reason: Option<String>) -> Self {
        Self {
            cancel_reason: reason,
            ..Self::new(Decision::Cancelled)
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.decision == Decision::Cancelled
    }

    pub fn is_completed(&self) -> bool {
        self.decision == Decision::Completed
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.decision, Decision::Skipped(_))
    }

    /// Whether every requested step succeeded
    pub fn succeeded(&self) -> bool {
        self.is_completed()
    }
}

/// Decides whether and how to send players to the first spawn
pub struct TeleportService {
    state: SharedState,
    events: Arc<EventBus>,
    server: Arc<dyn Server>,
}

impl TeleportService {
    pub fn new(state: SharedState, events: Arc<EventBus>, server: Arc<dyn Server>) -> Self {
        Self {
            state,
            events,
            server,
        }
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    /// Options the configuration asks for: welcome always, bed spawn per
    /// `set-bed-spawn`
    pub fn configured_options(&self) -> TeleportOptions {
        options_for(self.state.read().config())
    }

    /// Decision for a joining player. Only first joins are teleported.
    #[tracing::instrument(skip_all, fields(player = %player.name()))]
    pub fn handle_join(&self, player: &dyn Player) -> JoinOutcome {
        let config = self.state.read().config().clone();

        if !config.enabled {
            return JoinOutcome::skipped(SkipReason::Disabled);
        }
        if player.has_played_before() {
            return JoinOutcome::skipped(SkipReason::ReturningPlayer);
        }

        tracing::debug!("First join of {}", player.name());
        self.run(player, &config, options_for(&config))
    }

    /// Send `player` to the first spawn regardless of join history
    pub fn teleport(&self, player: &dyn Player, options: TeleportOptions) -> JoinOutcome {
        let config = self.state.read().config().clone();
        self.run(player, &config, options)
    }

    fn run(&self, player: &dyn Player, config: &SpawnConfig, options: TeleportOptions) -> JoinOutcome {
        if !config.enabled {
            return JoinOutcome::skipped(SkipReason::Disabled);
        }

        let Some(spawn) = config.location.as_ref().filter(|loc| self.is_usable(loc)) else {
            tracing::debug!("No first spawn location configured, skipping {}", player.name());
            return JoinOutcome::skipped(SkipReason::NoLocation);
        };

        let first_join = !player.has_played_before();

        let mut event = PlayerFirstSpawnEvent::new(player, spawn, first_join);
        if self.events.fire_pre_teleport(&mut event) {
            let reason = event.into_cancel_reason();
            tracing::debug!(
                "First spawn teleport for {} cancelled: {}",
                player.name(),
                reason.as_deref().unwrap_or("no reason given")
            );
            return JoinOutcome::cancelled(reason);
        }

        let destination = spawn.to_location();
        if let Err(e) = player.teleport(&destination) {
            tracing::warn!("Error teleporting player to first spawn: {}", e);
            return JoinOutcome::new(Decision::Failed);
        }

        let mut outcome = JoinOutcome::new(Decision::Completed);
        outcome.teleported = true;
        let mut failed = false;

        if options.contains(TeleportOptions::SET_BED_SPAWN) {
            match player.set_respawn_location(&destination, true) {
                Ok(()) => {
                    outcome.bed_spawn_set = true;
                    tracing::debug!("Set bed spawn location for {}", player.name());
                }
                Err(e) => {
                    tracing::warn!("Failed to set bed spawn for {}: {}", player.name(), e);
                    failed = true;
                }
            }
        }

        if options.contains(TeleportOptions::SEND_WELCOME) && !config.welcome_message.is_empty() {
            let message = translate_color_codes('&', &config.welcome_message);
            match player.send_message(&message) {
                Ok(()) => outcome.message_sent = true,
                Err(e) => {
                    tracing::warn!("Failed to send welcome message to {}: {}", player.name(), e);
                    failed = true;
                }
            }
        }

        self.events.fire_post_teleport(&PlayerFirstSpawnedEvent::new(
            player,
            spawn,
            first_join,
            outcome.message_sent,
        ));

        if failed {
            outcome.decision = Decision::Failed;
        }
        tracing::debug!("Teleported player {} to first spawn location", player.name());
        outcome
    }

    fn is_usable(&self, spawn: &SpawnLocation) -> bool {
        if self.server.is_world_loaded(&spawn.world) {
            true
        } else {
            tracing::warn!("World '{}' of the first spawn location is not loaded", spawn.world);
            false
        }
    }
}

fn options_for(config: &SpawnConfig) -> TeleportOptions {
    let mut options = TeleportOptions::SEND_WELCOME;
    options.set(TeleportOptions::SET_BED_SPAWN, config.set_bed_spawn);
    options
}
