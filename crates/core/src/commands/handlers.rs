//! The built-in `/firstspawn` subcommands

use std::sync::Arc;

use super::info::{CommandInfo, CommandResult};
use super::manager::{CommandManager, ROOT_COMMAND};
use crate::config::ConfigError;
use crate::service::{Decision, SkipReason, TeleportService};
use crate::text::{color, format_location};

/// Register set, status, test, toggle, reload and debug
pub fn register_default_commands(manager: &mut CommandManager, service: Arc<TeleportService>) {
    let svc = Arc::clone(&service);
    manager.register("set", "Set spawn location", true, move |info| set(&svc, info));

    let svc = Arc::clone(&service);
    manager.register("status", "Show current settings", false, move |info| status(&svc, info));

    let svc = Arc::clone(&service);
    manager.register("test", "Test teleport to spawn", true, move |info| test(&svc, info));

    let svc = Arc::clone(&service);
    manager.register("toggle", "Enable/disable plugin", false, move |info| toggle(&svc, info));

    let svc = Arc::clone(&service);
    manager.register("reload", "Reload configuration", false, move |info| reload(&svc, info));

    manager.register("debug", "Toggle debug mode", false, move |info| debug(&service, info));
}

fn save_failed(info: &CommandInfo<'_>, e: ConfigError) -> CommandResult {
    tracing::error!(
        "/{} {} by {}: failed to save configuration: {}",
        ROOT_COMMAND,
        info.subcommand(),
        info.sender().name(),
        e
    );
    info.reply_fmt(format_args!("{}Failed to save configuration: {}", color::RED, e));
    CommandResult::Failed
}

fn on_off(value: bool, on: &str, off: &str) -> String {
    if value {
        format!("{}{}", color::GREEN, on)
    } else {
        format!("{}{}", color::RED, off)
    }
}

fn set(service: &TeleportService, info: &CommandInfo<'_>) -> CommandResult {
    let Some(player) = info.player() else {
        return CommandResult::PlayersOnly;
    };

    let result = service.state().write().set_location(&player.location());
    match result {
        Ok(spawn) => {
            info.reply_fmt(format_args!(
                "{}First spawn location has been set to your current location!",
                color::GREEN
            ));
            let facing = spawn
                .facing
                .map(|d| format!("{} facing {}", color::YELLOW, d))
                .unwrap_or_default();
            info.reply_fmt(format_args!(
                "{}Location: {}{}",
                color::YELLOW,
                format_location(Some(&spawn)),
                facing
            ));
            CommandResult::Handled
        }
        Err(e) => save_failed(info, e),
    }
}

fn status(service: &TeleportService, info: &CommandInfo<'_>) -> CommandResult {
    let state = service.state().read();

    info.reply_fmt(format_args!("{}FirstSpawn Status:", color::GOLD));
    info.reply_fmt(format_args!(
        "{}Plugin enabled: {}",
        color::YELLOW,
        on_off(state.is_enabled(), "Yes", "No")
    ));
    info.reply_fmt(format_args!(
        "{}Debug mode: {}",
        color::YELLOW,
        on_off(state.is_debug(), "Enabled", "Disabled")
    ));
    info.reply_fmt(format_args!(
        "{}Set bed spawn: {}{} (config.toml)",
        color::YELLOW,
        on_off(state.set_bed_spawn(), "Enabled", "Disabled"),
        color::GRAY
    ));
    info.reply_fmt(format_args!(
        "{}Current spawn location: {}",
        color::YELLOW,
        format_location(state.location())
    ));
    let welcome = if state.welcome_message().is_empty() {
        format!("{}None", color::RED)
    } else {
        format!("{}{}", color::GREEN, state.welcome_message())
    };
    info.reply_fmt(format_args!("{}Welcome message: {}", color::YELLOW, welcome));

    CommandResult::Handled
}

fn test(service: &TeleportService, info: &CommandInfo<'_>) -> CommandResult {
    let Some(player) = info.player() else {
        return CommandResult::PlayersOnly;
    };

    let outcome = service.teleport(player, service.configured_options());
    match outcome.decision {
        Decision::Skipped(SkipReason::NoLocation) => {
            info.reply_fmt(format_args!("{}Spawn location is not set!", color::RED));
            CommandResult::Failed
        }
        Decision::Skipped(SkipReason::Disabled) => {
            info.reply_fmt(format_args!(
                "{}FirstSpawn is disabled. Use /firstspawn toggle to enable it.",
                color::RED
            ));
            CommandResult::Failed
        }
        Decision::Skipped(SkipReason::ReturningPlayer) => CommandResult::Handled,
        Decision::Cancelled => {
            info.reply_fmt(format_args!(
                "{}Teleport was cancelled: {}",
                color::RED,
                outcome.cancel_reason.as_deref().unwrap_or("no reason given")
            ));
            CommandResult::Failed
        }
        Decision::Completed | Decision::Failed if outcome.teleported => {
            info.reply_fmt(format_args!("{}Teleported to first spawn location!", color::GREEN));
            if outcome.bed_spawn_set {
                info.reply_fmt(format_args!(
                    "{}Your bed spawn location has been set to the first spawn location.",
                    color::YELLOW
                ));
            }
            if outcome.is_completed() {
                CommandResult::Handled
            } else {
                info.reply_fmt(format_args!(
                    "{}Some steps failed, check the server log.",
                    color::RED
                ));
                CommandResult::Failed
            }
        }
        Decision::Completed | Decision::Failed => {
            info.reply_fmt(format_args!(
                "{}Teleport failed, check the server log.",
                color::RED
            ));
            CommandResult::Failed
        }
    }
}

fn toggle(service: &TeleportService, info: &CommandInfo<'_>) -> CommandResult {
    let result = service.state().write().toggle_enabled();
    match result {
        Ok(enabled) => {
            info.reply_fmt(format_args!(
                "{}FirstSpawn is now {}",
                color::YELLOW,
                on_off(enabled, "enabled", "disabled")
            ));
            CommandResult::Handled
        }
        Err(e) => save_failed(info, e),
    }
}

fn debug(service: &TeleportService, info: &CommandInfo<'_>) -> CommandResult {
    let result = service.state().write().toggle_debug();
    match result {
        Ok(debug) => {
            info.reply_fmt(format_args!(
                "{}Debug mode is now {}",
                color::YELLOW,
                on_off(debug, "enabled", "disabled")
            ));
            CommandResult::Handled
        }
        Err(e) => save_failed(info, e),
    }
}

fn reload(service: &TeleportService, info: &CommandInfo<'_>) -> CommandResult {
    let result = service.state().write().reload();
    match result {
        Ok(()) => {
            info.reply_fmt(format_args!("{}Configuration reloaded!", color::GREEN));
            CommandResult::Handled
        }
        Err(e) => {
            tracing::error!("Failed to reload configuration: {}", e);
            info.reply_fmt(format_args!(
                "{}Failed to reload configuration: {}",
                color::RED,
                e
            ));
            CommandResult::Failed
        }
    }
}
