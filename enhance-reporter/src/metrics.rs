//! Prometheus-backed reporting API
//!
//! Keeps local call statistics instead of forwarding them, for deployments
//! that scrape the service rather than push to a health backend.

use crate::call_result::ServiceCallResult;
use crate::consumer::ConsumerApi;
use enhance_core::{Error, Result};
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};

/// Records call results as Prometheus metrics
pub struct MetricsConsumerApi {
    registry: Registry,
    calls_total: IntCounterVec,
    call_delay_seconds: HistogramVec,
}

impl MetricsConsumerApi {
    /// Create the metrics on a fresh registry
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let calls_total = IntCounterVec::new(
            Opts::new("enhance_service_calls_total", "Total number of reported service calls"),
            &["service", "method", "ret_status"],
        )
        .map_err(metric_error)?;

        let call_delay_seconds = HistogramVec::new(
            HistogramOpts::new(
                "enhance_service_call_delay_seconds",
                "Reported service call delay in seconds",
            ),
            &["service", "method"],
        )
        .map_err(metric_error)?;

        registry
            .register(Box::new(calls_total.clone()))
            .map_err(metric_error)?;
        registry
            .register(Box::new(call_delay_seconds.clone()))
            .map_err(metric_error)?;

        Ok(Self {
            registry,
            calls_total,
            call_delay_seconds,
        })
    }

    /// Gather metrics in Prometheus text format
    pub fn gather(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buffer)
            .map_err(metric_error)?;
        String::from_utf8(buffer).map_err(|e| Error::Internal(e.to_string()))
    }

    /// Number of calls recorded for a service, method and outcome.
    ///
    /// Looking up a label set that was never reported creates it with a zero
    /// count, so it shows up in later [`gather`](Self::gather) output.
    pub fn call_count(&self, service: &str, method: &str, ret_status: &str) -> u64 {
        self.calls_total
            .with_label_values(&[service, method, ret_status])
            .get()
    }
}

impl ConsumerApi for MetricsConsumerApi {
    fn update_service_call_result(&self, result: ServiceCallResult) -> Result<()> {
        self.calls_total
            .with_label_values(&[
                result.service.as_str(),
                result.method.as_str(),
                result.ret_status.as_str(),
            ])
            .inc();
        self.call_delay_seconds
            .with_label_values(&[result.service.as_str(), result.method.as_str()])
            .observe(result.delay_ms as f64 / 1000.0);
        Ok(())
    }
}

fn metric_error(e: prometheus::Error) -> Error {
    Error::Internal(format!("metrics: {}", e))
}
