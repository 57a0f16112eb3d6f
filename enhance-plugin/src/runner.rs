//! Ordered plugin runner

use crate::context::EnhancedPluginContext;
use crate::traits::{EnhancedPlugin, PluginType};
use std::sync::Arc;

/// Runs registered plugins at an extension point.
///
/// Plugins run in ascending [`order`](EnhancedPlugin::order); ties keep
/// registration order. A failing plugin is reported through its own
/// [`handle_throwable`](EnhancedPlugin::handle_throwable) and the remaining
/// plugins still run.
pub struct PluginRunner {
    plugins: Vec<Arc<dyn EnhancedPlugin>>,
}

impl PluginRunner {
    /// Create an empty runner
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    /// Register a plugin
    pub fn register(&mut self, plugin: Arc<dyn EnhancedPlugin>) {
        tracing::info!(
            "Registering plugin: {} ({:?}, order {})",
            plugin.name(),
            plugin.plugin_type(),
            plugin.order()
        );
        self.plugins.push(plugin);
        self.plugins.sort_by_key(|p| p.order());
    }

    /// Run every plugin of `plugin_type` against `ctx`
    pub fn run(&self, plugin_type: PluginType, ctx: &EnhancedPluginContext) {
        for plugin in self.plugins.iter().filter(|p| p.plugin_type() == plugin_type) {
            if let Err(err) = plugin.run(ctx) {
                plugin.handle_throwable(ctx, &err);
            }
        }
    }

    /// Names of registered plugins, in run order
    pub fn list(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }
}

impl Default for PluginRunner {
    fn default() -> Self {
        Self::new()
    }
}
