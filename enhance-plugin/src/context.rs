//! Per-call context handed to plugins

use http::{HeaderMap, Method, StatusCode, Uri};

/// An addressable endpoint taking part in a call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceInstance {
    /// Registered service name
    pub service_id: String,
    /// Host or IP
    pub host: String,
    /// Port, 0 when unknown
    pub port: u16,
}

impl ServiceInstance {
    /// Placeholder used wherever an instance is unknown
    pub const EMPTY: ServiceInstance = ServiceInstance {
        service_id: String::new(),
        host: String::new(),
        port: 0,
    };

    /// Create a plain-text instance
    pub fn new(service_id: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            service_id: service_id.into(),
            host: host.into(),
            port,
        }
    }

    /// Resolve an optional instance, falling back to [`ServiceInstance::EMPTY`]
    pub fn or_empty(instance: Option<&ServiceInstance>) -> &ServiceInstance {
        instance.unwrap_or(&EMPTY_INSTANCE)
    }
}

static EMPTY_INSTANCE: ServiceInstance = ServiceInstance::EMPTY;

/// Request side of a call
#[derive(Debug, Clone, Default)]
pub struct EnhancedRequestContext {
    pub http_method: Method,
    pub http_headers: HeaderMap,
    pub url: Uri,
}

/// Response side of a call
#[derive(Debug, Clone, Default)]
pub struct EnhancedResponseContext {
    pub http_status: Option<StatusCode>,
    pub http_headers: HeaderMap,
}

/// Everything a plugin knows about one call
#[derive(Debug, Clone, Default)]
pub struct EnhancedPluginContext {
    pub request: EnhancedRequestContext,
    pub response: EnhancedResponseContext,
    /// Elapsed time of the call in milliseconds
    pub delay_ms: u64,
    /// The calling service, if known
    pub local_service_instance: Option<ServiceInstance>,
    /// The called service, if resolved
    pub target_service_instance: Option<ServiceInstance>,
}

impl EnhancedPluginContext {
    /// Caller instance, or the empty placeholder
    pub fn caller(&self) -> &ServiceInstance {
        ServiceInstance::or_empty(self.local_service_instance.as_ref())
    }

    /// Callee instance, or the empty placeholder
    pub fn callee(&self) -> &ServiceInstance {
        ServiceInstance::or_empty(self.target_service_instance.as_ref())
    }
}
