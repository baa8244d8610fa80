//! Command senders

use crate::player::Player;

/// Whoever issued a command: a player or the server console.
pub trait CommandSender: Send + Sync {
    /// Sender name ("CONSOLE" for the server console)
    fn name(&self) -> &str;

    /// Deliver a reply. Console senders write to the server log.
    fn send_message(&self, message: &str);

    /// Check a permission node. The console holds every permission.
    fn has_permission(&self, permission: &str) -> bool;

    /// The player behind this sender, if any
    fn as_player(&self) -> Option<&dyn Player>;
}
