//! Call result records and outcome classification

use enhance_core::Error;
use enhance_core::config::{LocalMetadata, ReporterProperties, StatusSeries};
use enhance_plugin::{EnhancedRequestContext, EnhancedResponseContext, ServiceInstance};
use http::{HeaderMap, StatusCode};
use serde::Serialize;
use std::{fmt, io};

/// Response header a callee uses to override the outcome status
pub const HEADER_RET_STATUS: &str = "internal-callee-ret-status";

/// Response header carrying the name of the rule that fired on the callee
pub const HEADER_ACTIVE_RULE: &str = "internal-callee-activerule";

/// Statuses counted as failures when neither codes nor series are configured
const DEFAULT_FAILURE_STATUSES: [u16; 11] = [501, 502, 503, 504, 505, 506, 507, 508, 509, 510, 511];

/// Outcome of a call as seen by the health subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RetStatus {
    RetSuccess,
    RetFail,
    RetTimeout,
    RetFlowControl,
    RetReject,
    RetUnknown,
}

impl RetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RetStatus::RetSuccess => "RetSuccess",
            RetStatus::RetFail => "RetFail",
            RetStatus::RetTimeout => "RetTimeout",
            RetStatus::RetFlowControl => "RetFlowControl",
            RetStatus::RetReject => "RetReject",
            RetStatus::RetUnknown => "RetUnknown",
        }
    }
}

impl fmt::Display for RetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Namespace-qualified service name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceKey {
    pub namespace: String,
    pub service: String,
}

/// Summary of one completed call, handed to the reporting API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceCallResult {
    pub namespace: String,
    /// Callee service
    pub service: String,
    /// Callee host
    pub host: String,
    /// Callee port
    pub port: u16,
    /// Request path
    pub method: String,
    /// Response status code, -1 when there was none
    pub ret_code: i32,
    pub delay_ms: u64,
    pub caller_service: ServiceKey,
    pub caller_ip: String,
    pub ret_status: RetStatus,
    pub rule_name: Option<String>,
}

/// Inputs describing one finished call
#[derive(Debug, Clone, Copy)]
pub struct CallObservation<'a> {
    pub caller: &'a ServiceInstance,
    pub callee: &'a ServiceInstance,
    pub request: &'a EnhancedRequestContext,
    pub response: &'a EnhancedResponseContext,
    pub delay_ms: u64,
    /// Failure of the call itself, `None` on the success path
    pub error: Option<&'a Error>,
}

impl ServiceCallResult {
    /// Build the record for a finished call.
    ///
    /// Blank callee service id and host fall back to the request URL host.
    /// Response headers only feed `ret_status` and `rule_name`; request
    /// headers are not read.
    pub fn from_call(
        call: CallObservation<'_>,
        properties: &ReporterProperties,
        local: &LocalMetadata,
    ) -> Self {
        let url_host = call.request.url.host().unwrap_or_default();
        let status = call.response.http_status;
        let headers = &call.response.http_headers;

        let default_status = default_ret_status(status, call.error, properties);

        Self {
            namespace: local.namespace.clone(),
            service: non_blank_or(&call.callee.service_id, url_host),
            host: non_blank_or(&call.callee.host, url_host),
            port: call.callee.port,
            method: call.request.url.path().to_string(),
            ret_code: status.map_or(-1, |s| i32::from(s.as_u16())),
            delay_ms: call.delay_ms,
            caller_service: ServiceKey {
                namespace: local.namespace.clone(),
                service: local.service.clone(),
            },
            caller_ip: call.caller.host.clone(),
            ret_status: ret_status_from_headers(headers).unwrap_or(default_status),
            rule_name: decoded_header(headers, HEADER_ACTIVE_RULE),
        }
    }
}

fn non_blank_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

fn default_ret_status(
    status: Option<StatusCode>,
    error: Option<&Error>,
    properties: &ReporterProperties,
) -> RetStatus {
    match error {
        Some(Error::Io(e)) if e.kind() == io::ErrorKind::TimedOut => return RetStatus::RetTimeout,
        Some(_) => return RetStatus::RetFail,
        None => {}
    }
    match status {
        Some(status) if !is_failure_status(status, properties) => RetStatus::RetSuccess,
        _ => RetStatus::RetFail,
    }
}

/// Whether `status` counts as a failed call under `properties`.
///
/// Explicit `statuses` win. Otherwise 500 is ignored when configured, then
/// `series` applies, and with no series the built-in 5xx set is used.
pub fn is_failure_status(status: StatusCode, properties: &ReporterProperties) -> bool {
    let code = status.as_u16();
    if !properties.statuses.is_empty() {
        return properties.statuses.contains(&code);
    }
    if properties.ignore_internal_server_error && status == StatusCode::INTERNAL_SERVER_ERROR {
        return false;
    }
    if properties.series.is_empty() {
        return DEFAULT_FAILURE_STATUSES.contains(&code);
    }
    StatusSeries::of(code).is_some_and(|series| properties.series.contains(&series))
}

fn ret_status_from_headers(headers: &HeaderMap) -> Option<RetStatus> {
    match decoded_header(headers, HEADER_RET_STATUS)?.as_str() {
        "RetFlowControl" => Some(RetStatus::RetFlowControl),
        "RetReject" => Some(RetStatus::RetReject),
        _ => None,
    }
}

fn decoded_header(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(name)?.to_str().ok()?;
    let decoded = urlencoding::decode(raw).ok()?;
    if decoded.is_empty() {
        None
    } else {
        Some(decoded.into_owned())
    }
}
