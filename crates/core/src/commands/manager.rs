//! Command manager - subcommand registration and dispatch

use std::collections::HashMap;

use slotmap::{new_key_type, SlotMap};

use firstspawn_sdk::CommandSender;

use super::info::{CommandCallback, CommandInfo, CommandResult};
use crate::permissions;
use crate::text::color;

new_key_type! {
    /// Handle for a registered subcommand
    pub struct CommandKey;
}

/// Name of the root command
pub const ROOT_COMMAND: &str = "firstspawn";

/// Registered subcommand
struct CommandEntry {
    /// Lower-case name (e.g., "set")
    name: String,
    /// One-line help text
    description: String,
    /// Rejects console senders
    player_only: bool,
    callback: CommandCallback,
}

/// Subcommands of `/firstspawn`
pub struct CommandManager {
    /// Subcommands indexed by key
    commands: SlotMap<CommandKey, CommandEntry>,

    /// Lookup by name (lower-case)
    by_name: HashMap<String, CommandKey>,

    /// Registration order, used for help and completion
    order: Vec<CommandKey>,
}

impl Default for CommandManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandManager {
    pub fn new() -> Self {
        Self {
            commands: SlotMap::with_key(),
            by_name: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a subcommand
    ///
    /// Returns `None` if the name is taken.
    pub fn register<F>(
        &mut self,
        name: &str,
        description: &str,
        player_only: bool,
        callback: F,
    ) -> Option<CommandKey>
    where
        F: Fn(&CommandInfo<'_>) -> CommandResult + Send + Sync + 'static,
    {
        let name_lower = name.to_lowercase();

        if self.by_name.contains_key(&name_lower) {
            tracing::warn!("Subcommand '{}' already registered", name);
            return None;
        }

        let entry = CommandEntry {
            name: name_lower.clone(),
            description: description.to_string(),
            player_only,
            callback: Box::new(callback),
        };

        let key = self.commands.insert(entry);
        self.by_name.insert(name_lower, key);
        self.order.push(key);

        tracing::debug!("Registered subcommand: {} {}", ROOT_COMMAND, name);
        Some(key)
    }

    /// Unregister a subcommand by key
    pub fn unregister(&mut self, key: CommandKey) -> bool {
        if let Some(entry) = self.commands.remove(key) {
            self.by_name.remove(&entry.name);
            self.order.retain(|k| *k != key);
            tracing::debug!("Unregistered subcommand: {}", entry.name);
            true
        } else {
            false
        }
    }

    /// Find subcommand by name (case-insensitive)
    pub fn find_by_name(&self, name: &str) -> Option<CommandKey> {
        self.by_name.get(&name.to_lowercase()).copied()
    }

    /// Run `/firstspawn <args...>` for `sender`.
    ///
    /// Every outcome is reported to the sender.
    #[tracing::instrument(skip_all, fields(sender = %sender.name()))]
    pub fn dispatch(&self, sender: &dyn CommandSender, label: &str, args: &[&str]) -> CommandResult {
        let Some(sub) = args.first() else {
            self.send_help(sender);
            return CommandResult::Help;
        };
        let sub = sub.to_lowercase();

        if !permissions::can_use(sender, &sub) {
            sender.send_message(&format!(
                "{}You don't have permission to use this command.",
                color::RED
            ));
            return CommandResult::NoPermission;
        }

        let Some(entry) = self.find_by_name(&sub).and_then(|key| self.commands.get(key)) else {
            sender.send_message(&format!(
                "{}Unknown subcommand. Use /{} for help.",
                color::RED,
                ROOT_COMMAND
            ));
            return CommandResult::UnknownSubcommand;
        };

        if entry.player_only && sender.as_player().is_none() {
            sender.send_message(&format!(
                "{}This command can only be used by players!",
                color::RED
            ));
            return CommandResult::PlayersOnly;
        }

        let info = CommandInfo::new(sender, args.iter().map(|arg| (*arg).to_string()).collect());
        tracing::debug!("{} ran /{} {}", sender.name(), label, args.join(" "));
        (entry.callback)(&info)
    }

    /// Help listing only the subcommands `sender` may run
    pub fn send_help(&self, sender: &dyn CommandSender) {
        sender.send_message(&format!("{}FirstSpawn Commands:", color::GOLD));

        for entry in self.ordered() {
            if permissions::can_use(sender, &entry.name) {
                sender.send_message(&format!(
                    "{}/{} {} {}- {}",
                    color::YELLOW,
                    ROOT_COMMAND,
                    entry.name,
                    color::WHITE,
                    entry.description
                ));
            }
        }
    }

    /// Completions for the argument being typed.
    ///
    /// Only the first argument completes: subcommands starting with the
    /// typed prefix that `sender` may run.
    pub fn complete(&self, sender: &dyn CommandSender, args: &[&str]) -> Vec<String> {
        let [prefix] = args else {
            return Vec::new();
        };
        let prefix = prefix.to_lowercase();

        self.ordered()
            .filter(|entry| entry.name.starts_with(&prefix))
            .filter(|entry| permissions::can_use(sender, &entry.name))
            .map(|entry| entry.name.clone())
            .collect()
    }

    /// Iterate over (key, name, description) in registration order
    pub fn iter(&self) -> impl Iterator<Item = (CommandKey, &str, &str)> {
        self.order.iter().filter_map(|key| {
            self.commands
                .get(*key)
                .map(|entry| (*key, entry.name.as_str(), entry.description.as_str()))
        })
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    fn ordered(&self) -> impl Iterator<Item = &CommandEntry> {
        self.order.iter().filter_map(|key| self.commands.get(*key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use firstspawn_host::{ConsoleSender, MemoryPlayer};
    use firstspawn_sdk::Location;

    use crate::permissions::flags;
    use crate::text::strip_color;

    fn manager() -> CommandManager {
        let mut manager = CommandManager::new();
        manager.register("set", "Set spawn location", true, |_| CommandResult::Handled);
        manager.register("status", "Show current settings", false, |info| {
            info.reply("ok");
            CommandResult::Handled
        });
        manager.register("reload", "Reload configuration", false, |_| CommandResult::Handled);
        manager
    }

    fn player(permissions: &[&str]) -> MemoryPlayer {
        MemoryPlayer::new(2, "Robin", Location::new("world", 0.0, 64.0, 0.0))
            .with_permissions(permissions)
    }

    fn plain(messages: Vec<String>) -> Vec<String> {
        messages.iter().map(|m| strip_color(m)).collect()
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut manager = manager();
        assert!(manager.register("SET", "again", false, |_| CommandResult::Handled).is_none());
        assert!(manager.find_by_name("Status").is_some());
        assert_eq!(manager.len(), 3);
    }

    #[test]
    fn test_unregister() {
        let mut manager = manager();
        let key = manager.find_by_name("reload").unwrap();

        assert!(manager.unregister(key));
        assert!(!manager.unregister(key));
        assert!(manager.find_by_name("reload").is_none());
        assert_eq!(
            manager.iter().map(|(_, name, _)| name).collect::<Vec<_>>(),
            vec!["set", "status"]
        );
    }

    #[test]
    fn test_no_args_shows_filtered_help() {
        let manager = manager();
        let helper = player(&[flags::STATUS]);

        assert_eq!(manager.dispatch(&helper, "firstspawn", &[]), CommandResult::Help);
        assert_eq!(
            plain(helper.messages()),
            vec![
                "FirstSpawn Commands:".to_string(),
                "/firstspawn status - Show current settings".to_string(),
            ]
        );
    }

    #[test]
    fn test_permission_checked_first() {
        let manager = manager();
        let nobody = player(&[]);

        assert_eq!(
            manager.dispatch(&nobody, "firstspawn", &["status"]),
            CommandResult::NoPermission
        );
        assert_eq!(
            plain(nobody.messages()),
            vec!["You don't have permission to use this command.".to_string()]
        );
    }

    #[test]
    fn test_unknown_subcommand() {
        let manager = manager();
        let console = ConsoleSender::new();

        assert_eq!(
            manager.dispatch(&console, "firstspawn", &["teleport"]),
            CommandResult::UnknownSubcommand
        );
        assert_eq!(
            plain(console.messages()),
            vec!["Unknown subcommand. Use /firstspawn for help.".to_string()]
        );
    }

    #[test]
    fn test_player_only_rejects_console() {
        let manager = manager();
        let console = ConsoleSender::new();

        assert_eq!(
            manager.dispatch(&console, "firstspawn", &["set"]),
            CommandResult::PlayersOnly
        );
        assert_eq!(
            plain(console.messages()),
            vec!["This command can only be used by players!".to_string()]
        );
    }

    #[test]
    fn test_dispatch_is_case_insensitive() {
        let mut manager = CommandManager::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        manager.register("toggle", "Enable/disable plugin", false, move |info| {
            assert_eq!(info.subcommand(), "TOGGLE");
            counter.fetch_add(1, Ordering::SeqCst);
            CommandResult::Handled
        });

        let admin = player(&[flags::ADMIN]);
        assert_eq!(
            manager.dispatch(&admin, "fs", &["TOGGLE"]),
            CommandResult::Handled
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_complete_filters_prefix_and_permission() {
        let manager = manager();
        let admin = player(&[flags::ADMIN]);
        let helper = player(&[flags::STATUS]);

        assert_eq!(manager.complete(&admin, &["s"]), vec!["set", "status"]);
        assert_eq!(manager.complete(&admin, &["RE"]), vec!["reload"]);
        assert_eq!(manager.complete(&admin, &[""]), vec!["set", "status", "reload"]);
        assert_eq!(manager.complete(&helper, &["s"]), vec!["status"]);
        assert!(manager.complete(&admin, &["set", ""]).is_empty());
        assert!(manager.complete(&admin, &[]).is_empty());
    }
}
