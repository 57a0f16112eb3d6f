//! Service Call Result Reporting
//!
//! This crate turns finished outgoing calls into call result records and
//! submits them to a reporting API:
//! - Call result derivation and outcome classification
//! - HTTP and Prometheus reporting backends
//! - The post-call success reporter plugin

pub mod call_result;
pub mod consumer;
pub mod metrics;
mod success;

pub use call_result::{CallObservation, RetStatus, ServiceCallResult, ServiceKey};
pub use consumer::{ConsumerApi, HttpConsumerApi};
pub use metrics::MetricsConsumerApi;
pub use success::SuccessReporter;
