//! First-spawn event payloads

use firstspawn_sdk::Player;

use crate::location::SpawnLocation;

/// Raised before a player is sent to the first spawn.
///
/// Observers may cancel it; no relocation happens then and the reason is
/// handed back to the caller.
pub struct PlayerFirstSpawnEvent<'a> {
    player: &'a dyn Player,
    target: &'a SpawnLocation,
    first_join: bool,
    cancelled: bool,
    cancel_reason: Option<String>,
}

impl<'a> PlayerFirstSpawnEvent<'a> {
    pub fn new(player: &'a dyn Player, target: &'a SpawnLocation, first_join: bool) -> Self {
        Self {
            player,
            target,
            first_join,
            cancelled: false,
            cancel_reason: None,
        }
    }

    pub fn player(&self) -> &'a dyn Player {
        self.player
    }

    /// Where the player is about to be sent
    pub fn target_location(&self) -> &'a SpawnLocation {
        self.target
    }

    /// Whether this is the player's first connection to the server
    pub fn is_first_join(&self) -> bool {
        self.first_join
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }

    pub fn cancel_reason(&self) -> Option<&str> {
        self.cancel_reason.as_deref()
    }

    pub fn set_cancel_reason(&mut self, reason: impl Into<String>) {
        self.cancel_reason = Some(reason.into());
    }

    /// Cancel with a reason
    pub fn cancel(&mut self, reason: impl Into<String>) {
        self.cancelled = true;
        self.set_cancel_reason(reason);
    }

    pub(crate) fn into_cancel_reason(self) -> Option<String> {
        self.cancel_reason
    }
}

/// Raised after a player was sent to the first spawn. Not cancellable.
pub struct PlayerFirstSpawnedEvent<'a> {
    player: &'a dyn Player,
    spawn_location: &'a SpawnLocation,
    first_join: bool,
    welcome_message_sent: bool,
}

impl<'a> PlayerFirstSpawnedEvent<'a> {
    pub fn new(
        player: &'a dyn Player,
        spawn_location: &'a SpawnLocation,
        first_join: bool,
        welcome_message_sent: bool,
    ) -> Self {
        Self {
            player,
            spawn_location,
            first_join,
            welcome_message_sent,
        }
    }

    pub fn player(&self) -> &'a dyn Player {
        self.player
    }

    pub fn spawn_location(&self) -> &'a SpawnLocation {
        self.spawn_location
    }

    pub fn is_first_join(&self) -> bool {
        self.first_join
    }

    pub fn was_welcome_message_sent(&self) -> bool {
        self.welcome_message_sent
    }
}
