//! Server console sender

use parking_lot::Mutex;

use firstspawn_sdk::{CommandSender, Player};

/// The server console. Holds every permission and is never a player.
#[derive(Default)]
pub struct ConsoleSender {
    messages: Mutex<Vec<String>>,
}

impl ConsoleSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replies received, in order
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

impl CommandSender for ConsoleSender {
    fn name(&self) -> &str {
        "CONSOLE"
    }

    fn send_message(&self, message: &str) {
        tracing::info!("[Console] {}", message);
        self.messages.lock().push(message.to_string());
    }

    fn has_permission(&self, _permission: &str) -> bool {
        true
    }

    fn as_player(&self) -> Option<&dyn Player> {
        None
    }
}
