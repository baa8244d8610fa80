//! Online player double
//!
//! Records every call the plugin makes so tests can assert on side effects,
//! and can be told to fail individual host calls.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use firstspawn_sdk::{CommandSender, HostError, Location, Player, PlayerId};

#[derive(Default)]
struct PlayerState {
    location: Option<Location>,
    teleports: Vec<Location>,
    respawn: Option<(Location, bool)>,
    messages: Vec<String>,
    permissions: HashSet<String>,
}

/// A player connected to the in-process host
pub struct MemoryPlayer {
    id: PlayerId,
    name: String,
    played_before: bool,
    state: Mutex<PlayerState>,
    fail_teleport: AtomicBool,
    fail_respawn: AtomicBool,
    fail_message: AtomicBool,
}

impl MemoryPlayer {
    /// A player joining for the first time, standing at `location`
    pub fn new(id: u128, name: impl Into<String>, location: Location) -> Self {
        Self {
            id: PlayerId(id),
            name: name.into(),
            played_before: false,
            state: Mutex::new(PlayerState {
                location: Some(location),
                ..PlayerState::default()
            }),
            fail_teleport: AtomicBool::new(false),
            fail_respawn: AtomicBool::new(false),
            fail_message: AtomicBool::new(false),
        }
    }

    /// Mark the player as having joined before
    pub fn returning(mut self) -> Self {
        self.played_before = true;
        self
    }

    /// Grant permission nodes
    pub fn with_permissions(self, permissions: &[&str]) -> Self {
        {
            let mut state = self.state.lock();
            for perm in permissions {
                state.permissions.insert((*perm).to_string());
            }
        }
        self
    }

    /// Make `teleport` fail
    pub fn fail_teleport(&self, fail: bool) {
        self.fail_teleport.store(fail, Ordering::Relaxed);
    }

    /// Make `set_respawn_location` fail
    pub fn fail_respawn(&self, fail: bool) {
        self.fail_respawn.store(fail, Ordering::Relaxed);
    }

    /// Make `send_message` fail
    pub fn fail_message(&self, fail: bool) {
        self.fail_message.store(fail, Ordering::Relaxed);
    }

    /// Move the player without recording a teleport
    pub fn set_location(&self, location: Location) {
        self.state.lock().location = Some(location);
    }

    /// Every teleport destination, in order
    pub fn teleports(&self) -> Vec<Location> {
        self.state.lock().teleports.clone()
    }

    /// Respawn point and the `force` flag it was set with
    pub fn respawn(&self) -> Option<(Location, bool)> {
        self.state.lock().respawn.clone()
    }

    /// Every message received, in order
    pub fn messages(&self) -> Vec<String> {
        self.state.lock().messages.clone()
    }
}

impl Player for MemoryPlayer {
    fn id(&self) -> PlayerId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn has_played_before(&self) -> bool {
        self.played_before
    }

    fn location(&self) -> Location {
        self.state
            .lock()
            .location
            .clone()
            .unwrap_or_else(|| Location::new("world", 0.0, 64.0, 0.0))
    }

    fn teleport(&self, destination: &Location) -> Result<(), HostError> {
        if self.fail_teleport.load(Ordering::Relaxed) {
            return Err(HostError::Rejected(format!("teleport of {} vetoed", self.name)));
        }
        let mut state = self.state.lock();
        state.teleports.push(destination.clone());
        state.location = Some(destination.clone());
        Ok(())
    }

    fn set_respawn_location(&self, location: &Location, force: bool) -> Result<(), HostError> {
        if self.fail_respawn.load(Ordering::Relaxed) {
            return Err(HostError::Other("respawn point unavailable".to_string()));
        }
        self.state.lock().respawn = Some((location.clone(), force));
        Ok(())
    }

    fn send_message(&self, message: &str) -> Result<(), HostError> {
        if self.fail_message.load(Ordering::Relaxed) {
            return Err(HostError::PlayerOffline(self.name.clone()));
        }
        self.state.lock().messages.push(message.to_string());
        Ok(())
    }

    fn has_permission(&self, permission: &str) -> bool {
        self.state.lock().permissions.contains(permission)
    }
}

impl CommandSender for MemoryPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn send_message(&self, message: &str) {
        if let Err(e) = Player::send_message(self, message) {
            tracing::debug!("Dropped reply to {}: {}", self.name, e);
        }
    }

    fn has_permission(&self, permission: &str) -> bool {
        Player::has_permission(self, permission)
    }

    fn as_player(&self) -> Option<&dyn Player> {
        Some(self)
    }
}
