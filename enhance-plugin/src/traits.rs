//! Plugin traits

use crate::context::EnhancedPluginContext;
use enhance_core::{Error, Result};

/// Order value that runs before everything else
pub const HIGHEST_PRECEDENCE: i32 = i32::MIN;

/// Order value that runs after everything else
pub const LOWEST_PRECEDENCE: i32 = i32::MAX;

/// Order of a plugin that does not care where it runs
pub const DEFAULT_ORDER: i32 = 0;

/// Extension point a plugin is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginType {
    /// Before an outgoing call is sent
    ClientPre,
    /// After an outgoing call completed successfully
    ClientPost,
    /// After an outgoing call failed
    ClientException,
    /// After an outgoing call, whatever the outcome
    ClientFinally,
    /// Before an incoming request is handled
    ServerPre,
    /// After an incoming request was handled
    ServerPost,
}

/// A hook invoked by the call pipeline.
///
/// Plugins are shared across calls and may run concurrently, so they must
/// be `Send + Sync` and keep no per-call state.
pub trait EnhancedPlugin: Send + Sync {
    /// Plugin name, used in logs
    fn name(&self) -> &str;

    /// Extension point this plugin runs at
    fn plugin_type(&self) -> PluginType;

    /// Execute the plugin for one call
    fn run(&self, ctx: &EnhancedPluginContext) -> Result<()>;

    /// Called with the error when [`run`](Self::run) fails. Must not panic.
    fn handle_throwable(&self, ctx: &EnhancedPluginContext, err: &Error) {
        tracing::error!(plugin = self.name(), ?ctx, error = %err, "Plugin run failed");
    }

    /// Position among plugins of the same type (lower runs earlier)
    fn order(&self) -> i32 {
        DEFAULT_ORDER
    }
}
