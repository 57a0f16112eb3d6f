//! Error types for the RPC enhancement plugins

use thiserror::Error;

/// Result type for enhancement operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for enhancement plugins
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Plugin execution error
    #[error("Plugin error: {0}")]
    Plugin(String),

    /// Reporting API error
    #[error("Report error: {0}")]
    Report(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
