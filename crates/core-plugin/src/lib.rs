//! Plugin host: the capability contract extensions implement and the
//! lifecycle that merges their commands into the `CommandRegistry`.
//!
//! Each plugin moves through `Discovered -> Initialized -> Active ->
//! CleanedUp`. A plugin whose `initialize` fails is logged and dropped; the
//! load pass continues with the next one. Cleanup failures at shutdown are
//! collected and returned, never propagated, so every active plugin gets its
//! turn.
//!
//! Loading a plugin under a name that is already hosted replaces it for
//! lookups; the displaced instance stays owned by the host and is still
//! cleaned up at shutdown.
//!
//! Commands are merged without namespacing: a plugin command named like a
//! built-in (or like another plugin's command) replaces it in the registry.
//!
//! How plugins are found is the loader's business. `StaticLoader` hands over
//! compiled-in constructors; a dynamic-library or subprocess loader would
//! implement `PluginLoader` the same way.

use core_actions::{Command, CommandRegistry};
use tracing::{debug, info, warn};

mod loader;
pub use loader::{PluginConstructor, PluginLoader, StaticLoader};

/// Version reported to plugins through `HostContext`.
pub const HOST_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PluginError {
    #[error("plugin {plugin} failed to initialize: {reason}")]
    Init { plugin: String, reason: String },
    #[error("plugin {plugin} failed to clean up: {reason}")]
    Cleanup { plugin: String, reason: String },
}

impl PluginError {
    pub fn init(plugin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Init {
            plugin: plugin.into(),
            reason: reason.into(),
        }
    }

    pub fn cleanup(plugin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Cleanup {
            plugin: plugin.into(),
            reason: reason.into(),
        }
    }

    pub fn plugin(&self) -> &str {
        match self {
            Self::Init { plugin, .. } | Self::Cleanup { plugin, .. } => plugin,
        }
    }
}

/// Capability set every plugin implements.
pub trait Plugin {
    fn name(&self) -> &str;
    /// Commands merged into the registry after a successful `initialize`.
    fn commands(&self) -> Vec<Command>;
    fn initialize(&mut self, ctx: &mut HostContext<'_>) -> Result<(), PluginError>;
    fn cleanup(&mut self) -> Result<(), PluginError>;
}

/// What a plugin may see of the host while initializing.
pub struct HostContext<'a> {
    version: &'static str,
    registry: &'a CommandRegistry,
}

impl<'a> HostContext<'a> {
    pub fn new(registry: &'a CommandRegistry) -> Self {
        Self {
            version: HOST_VERSION,
            registry,
        }
    }

    pub fn version(&self) -> &'static str {
        self.version
    }

    pub fn registry(&self) -> &CommandRegistry {
        self.registry
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginState {
    Discovered,
    Initialized,
    Active,
    CleanedUp,
    Failed,
}

struct HostedPlugin {
    plugin: Box<dyn Plugin>,
    state: PluginState,
    /// A later plugin took this name; hidden from lookups, kept for cleanup.
    replaced: bool,
}

/// Outcome of one `load_all` pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: Vec<String>,
    pub failed: Vec<PluginError>,
}

/// Owns initialized plugins for the life of the process.
#[derive(Default)]
pub struct PluginHost {
    plugins: Vec<HostedPlugin>,
}

impl PluginHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize `plugin` and merge its commands into `registry`.
    ///
    /// On failure the plugin is dropped and the error returned; nothing it
    /// contributes reaches the registry.
    pub fn load(
        &mut self,
        mut plugin: Box<dyn Plugin>,
        registry: &mut CommandRegistry,
    ) -> Result<(), PluginError> {
        let name = plugin.name().to_string();
        let mut state = PluginState::Discovered;
        debug!(target: "plugin.host", plugin = %name, ?state, "plugin_discovered");

        let mut ctx = HostContext::new(registry);
        if let Err(e) = plugin.initialize(&mut ctx) {
            warn!(target: "plugin.host", plugin = %name, error = %e, state = ?PluginState::Failed, "plugin_init_failed");
            return Err(e);
        }
        state = PluginState::Initialized;
        debug!(target: "plugin.host", plugin = %name, ?state, "plugin_initialized");

        let commands = plugin.commands();
        let merged = commands.len();
        for command in commands {
            registry.register(command);
        }
        state = PluginState::Active;

        if let Some(prev) = self
            .plugins
            .iter_mut()
            .find(|p| !p.replaced && p.plugin.name() == name)
        {
            // Its commands stay unless overwritten above.
            prev.replaced = true;
            warn!(target: "plugin.host", plugin = %name, "plugin_replaced");
        }
        self.plugins.push(HostedPlugin {
            plugin,
            state,
            replaced: false,
        });
        info!(target: "plugin.host", plugin = %name, commands = merged, "plugin_loaded");
        Ok(())
    }

    /// Load every plugin `loader` produces. One failure never stops the pass.
    pub fn load_all(
        &mut self,
        loader: &mut dyn PluginLoader,
        registry: &mut CommandRegistry,
    ) -> LoadReport {
        let mut report = LoadReport::default();
        let discovered = loader.discover();
        debug!(target: "plugin.host", loader = loader.name(), count = discovered.len(), "load_pass_start");
        for plugin in discovered {
            let name = plugin.name().to_string();
            match self.load(plugin, registry) {
                Ok(()) => report.loaded.push(name),
                Err(e) => report.failed.push(e),
            }
        }
        info!(
            target: "plugin.host",
            loaded = report.loaded.len(),
            failed = report.failed.len(),
            "load_pass_complete"
        );
        report
    }

    /// Clean up active plugins in load order, including ones displaced by a
    /// same-name load. Failures are collected so
    /// every plugin is visited; a second call does nothing.
    pub fn shutdown(&mut self) -> Vec<PluginError> {
        let mut errors = Vec::new();
        for hosted in self
            .plugins
            .iter_mut()
            .filter(|p| p.state == PluginState::Active)
        {
            match hosted.plugin.cleanup() {
                Ok(()) => {
                    hosted.state = PluginState::CleanedUp;
                    debug!(target: "plugin.host", plugin = hosted.plugin.name(), "plugin_cleaned_up");
                }
                Err(e) => {
                    hosted.state = PluginState::Failed;
                    warn!(target: "plugin.host", plugin = hosted.plugin.name(), error = %e, "plugin_cleanup_failed");
                    errors.push(e);
                }
            }
        }
        errors
    }

    fn current(&self) -> impl Iterator<Item = &HostedPlugin> {
        self.plugins.iter().filter(|p| !p.replaced)
    }

    pub fn state(&self, name: &str) -> Option<PluginState> {
        self.current()
            .find(|p| p.plugin.name() == name)
            .map(|p| p.state)
    }

    /// Names of hosted plugins in load order.
    pub fn names(&self) -> Vec<&str> {
        self.current().map(|p| p.plugin.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.current().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
