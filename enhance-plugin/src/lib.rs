//! RPC Enhancement Plugin System
//!
//! Hooks that run around outgoing service calls. A host pipeline builds an
//! [`EnhancedPluginContext`] per call and hands it to a [`PluginRunner`],
//! which invokes every matching [`EnhancedPlugin`] in order.

mod context;
mod runner;
mod traits;

pub use context::{
    EnhancedPluginContext, EnhancedRequestContext, EnhancedResponseContext, ServiceInstance,
};
pub use runner::PluginRunner;
pub use traits::{
    DEFAULT_ORDER, EnhancedPlugin, HIGHEST_PRECEDENCE, LOWEST_PRECEDENCE, PluginType,
};
