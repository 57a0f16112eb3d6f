//! Configuration type definitions
//!
//! These types represent the runtime configuration of the enhancement plugins.

use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EnhancementConfig {
    /// Call result reporting
    #[serde(default)]
    pub reporter: ReporterProperties,

    /// Identity of the local service
    #[serde(default)]
    pub metadata: LocalMetadata,

    /// Reporting API endpoint
    #[serde(default)]
    pub consumer: ConsumerConfig,

    /// Global logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Call result reporter properties
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReporterProperties {
    /// Whether call results are reported at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Do not count 500 as a failure when only series are configured
    #[serde(default = "default_true")]
    pub ignore_internal_server_error: bool,

    /// Status series counted as failures
    #[serde(default)]
    pub series: Vec<StatusSeries>,

    /// Exact status codes counted as failures, takes precedence over `series`
    #[serde(default)]
    pub statuses: Vec<u16>,
}

impl Default for ReporterProperties {
    fn default() -> Self {
        Self {
            enabled: true,
            ignore_internal_server_error: true,
            series: Vec::new(),
            statuses: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// HTTP status series (first digit of the code)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StatusSeries {
    Informational,
    Successful,
    Redirection,
    ClientError,
    ServerError,
}

impl StatusSeries {
    /// Series of a status code, `None` outside 100..=599
    pub fn of(code: u16) -> Option<Self> {
        match code / 100 {
            1 => Some(Self::Informational),
            2 => Some(Self::Successful),
            3 => Some(Self::Redirection),
            4 => Some(Self::ClientError),
            5 => Some(Self::ServerError),
            _ => None,
        }
    }
}

/// Identity of the local (caller) service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalMetadata {
    /// Namespace the service is registered in
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Local service name
    #[serde(default)]
    pub service: String,
}

impl Default for LocalMetadata {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            service: String::new(),
        }
    }
}

fn default_namespace() -> String {
    "default".to_string()
}

/// Reporting API client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumerConfig {
    /// URL the call results are posted to
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    1000
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
