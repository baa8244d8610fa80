//! Connected player handle

use std::fmt;

use crate::error::HostError;
use crate::location::Location;

/// Stable player identity (UUID as a 128-bit integer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u128);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
            (v >> 96) as u32,
            (v >> 80) as u16,
            (v >> 64) as u16,
            (v >> 48) as u16,
            v & 0xffff_ffff_ffff
        )
    }
}

/// An online player as exposed by the host.
///
/// Calls are made on the thread that owns the player (main thread, or the
/// player's region thread on regionized hosts).
pub trait Player: Send + Sync {
    /// Player identity
    fn id(&self) -> PlayerId;

    /// Display name
    fn name(&self) -> &str;

    /// Whether the host has seen this player connect before this session
    fn has_played_before(&self) -> bool;

    /// Current position
    fn location(&self) -> Location;

    /// Move the player
    fn teleport(&self, destination: &Location) -> Result<(), HostError>;

    /// Set the point the player returns to after death.
    ///
    /// `force` sets it even when there is no bed at the location.
    fn set_respawn_location(&self, location: &Location, force: bool) -> Result<(), HostError>;

    /// Send a chat message to the player
    fn send_message(&self, message: &str) -> Result<(), HostError>;

    /// Check a permission node (e.g. `firstspawn.set`)
    fn has_permission(&self, permission: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_display() {
        let id = PlayerId(0x0123_4567_89ab_cdef_0011_2233_4455_6677);
        assert_eq!(id.to_string(), "01234567-89ab-cdef-0011-223344556677");
    }
}
