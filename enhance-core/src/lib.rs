//! RPC Enhancement Core Library
//!
//! This crate provides the shared pieces used by the enhancement plugins,
//! including configuration management, logging setup, and error handling.

pub mod config;
pub mod error;
pub mod telemetry;

pub use error::{Error, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
