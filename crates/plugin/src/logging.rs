//! Logging bootstrap
//!
//! Installs a `fmt` subscriber whose filter sits behind a reload layer, so
//! the `debug` config flag can change verbosity without a restart.
//! `RUST_LOG` still sets the level for everything outside the plugin.

use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, Registry};

/// Crates whose level follows the `debug` flag
const PLUGIN_TARGETS: &[&str] = &["firstspawn", "firstspawn_core", "firstspawn_engine"];

/// Filter with the plugin's targets at `debug` or `info`
pub fn plugin_filter(verbose: bool) -> EnvFilter {
    let level = if verbose { "debug" } else { "info" };
    let mut filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    for target in PLUGIN_TARGETS {
        match format!("{}={}", target, level).parse() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(e) => tracing::warn!("Invalid log directive for {}: {}", target, e),
        }
    }
    filter
}

/// Handle for changing the plugin's log level at runtime
#[derive(Clone)]
pub struct LogHandle {
    handle: reload::Handle<EnvFilter, Registry>,
}

impl LogHandle {
    pub fn set_debug(&self, verbose: bool) {
        let state = if verbose { "enabled" } else { "disabled" };
        match self.handle.reload(plugin_filter(verbose)) {
            Ok(()) => tracing::info!("Debug logging {}", state),
            Err(e) => tracing::warn!("Failed to change log level: {}", e),
        }
    }
}

/// Install the global subscriber.
///
/// Returns `None` when the host already installed one; its configuration is
/// left alone and the `debug` flag then has no effect on output.
pub fn init_logging(verbose: bool) -> Option<LogHandle> {
    let (filter, handle) = reload::Layer::new(plugin_filter(verbose));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init()
        .ok()?;

    Some(LogHandle { handle })
}
