//! Command information types

use firstspawn_sdk::{CommandSender, Player};

/// Result of command execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    /// Subcommand ran
    Handled,
    /// No subcommand given, help was shown
    Help,
    /// Sender lacks the subcommand's node
    NoPermission,
    /// No subcommand with that name
    UnknownSubcommand,
    /// Subcommand needs a player and the sender is not one
    PlayersOnly,
    /// Subcommand ran but could not do its job; the sender was told why
    Failed,
}

impl CommandResult {
    /// Whether the host should consider the command consumed
    pub fn is_handled(&self) -> bool {
        !matches!(self, Self::UnknownSubcommand)
    }
}

/// Information about a command invocation
pub struct CommandInfo<'a> {
    /// Who ran it
    sender: &'a dyn CommandSender,

    /// Arguments after the root command (index 0 is the subcommand)
    args: Vec<String>,
}

impl<'a> CommandInfo<'a> {
    pub fn new(sender: &'a dyn CommandSender, args: Vec<String>) -> Self {
        Self { sender, args }
    }

    /// Get argument by index (0 = subcommand)
    ///
    /// Returns empty string if index is out of bounds.
    pub fn arg(&self, index: usize) -> &str {
        self.args.get(index).map(|s| s.as_str()).unwrap_or("")
    }

    /// Get the subcommand name (alias for arg(0))
    pub fn subcommand(&self) -> &str {
        self.arg(0)
    }

    pub fn sender(&self) -> &'a dyn CommandSender {
        self.sender
    }

    /// The player who ran the command (None for console)
    pub fn player(&self) -> Option<&'a dyn Player> {
        self.sender.as_player()
    }

    /// Reply to the sender
    pub fn reply(&self, message: &str) {
        self.sender.send_message(message);
    }

    /// Reply with formatted message
    pub fn reply_fmt(&self, args: std::fmt::Arguments<'_>) {
        self.reply(&args.to_string());
    }
}

/// Type alias for subcommand callbacks
pub type CommandCallback = Box<dyn Fn(&CommandInfo<'_>) -> CommandResult + Send + Sync>;
