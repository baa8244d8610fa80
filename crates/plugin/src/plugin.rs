//! Plugin lifecycle and host entry points

use std::path::PathBuf;
use std::sync::Arc;

use firstspawn_core::commands::{register_default_commands, CommandManager, CommandResult};
use firstspawn_core::config::{plugin_data_dir, FirstSpawnConfig, PluginConfig};
use firstspawn_core::{
    EventBus, FirstSpawnApi, JoinListener, JoinOutcome, SharedState, SpawnState, TeleportService,
    UpdateChecker,
};
use firstspawn_engine::{select_scheduler, Scheduler};
use firstspawn_sdk::{CommandSender, Player, Server};

use crate::logging::{self, LogHandle};
use crate::metadata;

/// Errors that prevent the plugin from enabling
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("Failed to create data directory {path:?}: {source}")]
    DataDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A running plugin instance
pub struct FirstSpawnPlugin {
    scheduler: Arc<dyn Scheduler>,
    state: SharedState,
    service: Arc<TeleportService>,
    commands: CommandManager,
    join: JoinListener,
    updates: Option<Arc<UpdateChecker>>,
    logging: Option<LogHandle>,
}

impl FirstSpawnPlugin {
    /// Load configuration, pick a scheduler and wire everything up.
    ///
    /// `data_dir` is the directory the host gives plugins; the plugin keeps
    /// its files in `{data_dir}/firstspawn/`.
    #[tracing::instrument(skip_all, fields(server = %server.name()))]
    pub fn enable(server: Arc<dyn Server>, data_dir: impl Into<PathBuf>) -> Result<Self, PluginError> {
        let data_dir = data_dir.into();
        let own_dir = plugin_data_dir(&data_dir, FirstSpawnConfig::PLUGIN_NAME);
        std::fs::create_dir_all(&own_dir).map_err(|source| PluginError::DataDirectory {
            path: own_dir.clone(),
            source,
        })?;

        let mut state = SpawnState::load(&data_dir, Arc::clone(&server));

        let logging = logging::init_logging(state.is_debug());
        if let Some(handle) = logging.clone() {
            state.set_debug_hook(Box::new(move |debug| handle.set_debug(debug)));
        }
        let update_settings = state.update_checker().clone();
        let state = state.into_shared();

        let scheduler = select_scheduler(server.as_ref());
        tracing::info!("Using {} scheduler", scheduler.platform());

        let events = Arc::new(EventBus::new());
        let service = Arc::new(TeleportService::new(
            Arc::clone(&state),
            events,
            Arc::clone(&server),
        ));

        let mut commands = CommandManager::new();
        register_default_commands(&mut commands, Arc::clone(&service));

        let updates = update_settings.enabled.then(|| {
            let checker = UpdateChecker::new(
                Arc::clone(&server),
                Arc::clone(&scheduler),
                metadata::VERSION,
                &update_settings,
            );
            checker.check_for_updates();
            tracing::debug!(
                "Update checker initialized with resource ID: {}",
                update_settings.resource_id
            );
            checker
        });

        let join = JoinListener::new(Arc::clone(&service), Arc::clone(&scheduler), updates.clone());

        tracing::info!(
            "{} v{} by {} has been enabled!",
            metadata::NAME,
            metadata::VERSION,
            metadata::AUTHOR
        );
        Ok(Self {
            scheduler,
            state,
            service,
            commands,
            join,
            updates,
            logging,
        })
    }

    /// Shut down. Work already handed to the host scheduler is not recalled.
    pub fn disable(self) {
        tracing::info!("{} has been disabled!", metadata::NAME);
    }

    /// Service lookup for other plugins
    pub fn api(&self) -> Arc<dyn FirstSpawnApi> {
        self.service.clone()
    }

    /// Host notification: a player joined
    pub fn on_player_join(&self, player: Arc<dyn Player>) -> JoinOutcome {
        self.join.on_player_join(player)
    }

    /// Host notification: `/firstspawn <args...>` was run
    pub fn on_command(&self, sender: &dyn CommandSender, label: &str, args: &[&str]) -> CommandResult {
        self.commands.dispatch(sender, label, args)
    }

    /// Host request: completions for `/firstspawn <args...>`
    pub fn on_tab_complete(&self, sender: &dyn CommandSender, args: &[&str]) -> Vec<String> {
        self.commands.complete(sender, args)
    }

    pub fn scheduler(&self) -> &Arc<dyn Scheduler> {
        &self.scheduler
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    pub fn update_checker(&self) -> Option<&Arc<UpdateChecker>> {
        self.updates.as_ref()
    }

    /// Whether this instance installed the global log subscriber
    pub fn owns_logging(&self) -> bool {
        self.logging.is_some()
    }
}
