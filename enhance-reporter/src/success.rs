//! Reporter for successful outgoing calls

use crate::call_result::{CallObservation, ServiceCallResult};
use crate::consumer::ConsumerApi;
use enhance_core::config::{LocalMetadata, ReporterProperties};
use enhance_core::{Error, Result};
use enhance_plugin::{EnhancedPlugin, EnhancedPluginContext, HIGHEST_PRECEDENCE, PluginType};
use std::sync::Arc;

/// Reports the result of every successful outgoing call to the health
/// subsystem, so it can feed instance statistics and circuit breaking.
pub struct SuccessReporter {
    properties: Arc<ReporterProperties>,
    metadata: LocalMetadata,
    consumer_api: Arc<dyn ConsumerApi>,
}

impl SuccessReporter {
    pub fn new(
        properties: Arc<ReporterProperties>,
        metadata: LocalMetadata,
        consumer_api: Arc<dyn ConsumerApi>,
    ) -> Self {
        Self {
            properties,
            metadata,
            consumer_api,
        }
    }
}

impl EnhancedPlugin for SuccessReporter {
    fn name(&self) -> &str {
        "SuccessReporter"
    }

    fn plugin_type(&self) -> PluginType {
        PluginType::ClientPost
    }

    fn run(&self, ctx: &EnhancedPluginContext) -> Result<()> {
        if !self.properties.enabled {
            return Ok(());
        }

        let request = &ctx.request;
        let result = ServiceCallResult::from_call(
            CallObservation {
                caller: ctx.caller(),
                callee: ctx.callee(),
                request,
                response: &ctx.response,
                delay_ms: ctx.delay_ms,
                error: None,
            },
            &self.properties,
            &self.metadata,
        );

        tracing::debug!(
            "Will report ServiceCallResult of {}. Request=[{} {}]. Response=[{}]. Delay=[{}]ms.",
            result.ret_status,
            request.http_method,
            request.url.path(),
            result.ret_code,
            ctx.delay_ms
        );

        self.consumer_api.update_service_call_result(result)
    }

    fn handle_throwable(&self, ctx: &EnhancedPluginContext, err: &Error) {
        tracing::error!(error = %err, "SuccessReporter runs failed. context=[{:?}].", ctx);
    }

    fn order(&self) -> i32 {
        HIGHEST_PRECEDENCE + 1
    }
}
