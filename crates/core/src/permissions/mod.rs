//! Permission nodes
//!
//! Nodes use the host's dotted form `domain.flag`. The `admin` flag of a
//! domain grants every other flag in it:
//!
//! - `firstspawn.set` - run `/firstspawn set`
//! - `firstspawn.admin` - run every subcommand and receive update notices
//!
//! The host owns permission storage; this module only names nodes and
//! evaluates them against a sender.

use firstspawn_sdk::CommandSender;

/// Separator between domain and flag
pub const PERMISSION_SEPARATOR: char = '.';

/// Permission nodes used by the plugin
pub mod flags {
    /// Grants every `firstspawn.*` node
    pub const ADMIN: &str = "firstspawn.admin";
    pub const SET: &str = "firstspawn.set";
    pub const STATUS: &str = "firstspawn.status";
    pub const TEST: &str = "firstspawn.test";
    pub const TOGGLE: &str = "firstspawn.toggle";
    pub const RELOAD: &str = "firstspawn.reload";
    pub const DEBUG: &str = "firstspawn.debug";
}

/// Node guarding a subcommand: `firstspawn.<name>`
pub fn subcommand_node(name: &str) -> String {
    format!("firstspawn{}{}", PERMISSION_SEPARATOR, name.to_lowercase())
}

/// Extract domain from a node
///
/// `firstspawn.set` -> `Some("firstspawn")`
/// `invalid` -> `None`
pub fn extract_domain(node: &str) -> Option<&str> {
    node.split_once(PERMISSION_SEPARATOR)
        .map(|(domain, _)| domain)
        .filter(|domain| !domain.is_empty())
}

/// Check a node, honouring the domain's admin flag
pub fn has_node(sender: &dyn CommandSender, node: &str) -> bool {
    if sender.has_permission(node) {
        return true;
    }

    match extract_domain(node) {
        Some(domain) => sender.has_permission(&format!("{}{}admin", domain, PERMISSION_SEPARATOR)),
        None => false,
    }
}

/// Whether `sender` may run the subcommand `name`
pub fn can_use(sender: &dyn CommandSender, name: &str) -> bool {
    has_node(sender, &subcommand_node(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    use firstspawn_host::{ConsoleSender, MemoryPlayer};
    use firstspawn_sdk::Location;

    fn player(permissions: &[&str]) -> MemoryPlayer {
        MemoryPlayer::new(9, "Mod", Location::new("world", 0.0, 64.0, 0.0))
            .with_permissions(permissions)
    }

    #[test]
    fn test_subcommand_node() {
        assert_eq!(subcommand_node("set"), flags::SET);
        assert_eq!(subcommand_node("RELOAD"), flags::RELOAD);
    }

    #[test]
    fn test_extract_domain() {
        assert_eq!(extract_domain("firstspawn.set"), Some("firstspawn"));
        assert_eq!(extract_domain("invalid"), None);
        assert_eq!(extract_domain(".set"), None);
    }

    #[test]
    fn test_admin_grants_every_subcommand() {
        let admin = player(&[flags::ADMIN]);
        for sub in ["set", "status", "test", "toggle", "reload", "debug"] {
            assert!(can_use(&admin, sub), "{}", sub);
        }
    }

    #[test]
    fn test_specific_node_grants_only_its_subcommand() {
        let helper = player(&[flags::STATUS]);
        assert!(can_use(&helper, "status"));
        assert!(!can_use(&helper, "set"));
        assert!(!has_node(&helper, flags::ADMIN));
    }

    #[test]
    fn test_console_has_everything() {
        assert!(can_use(&ConsoleSender::new(), "reload"));
    }
}
