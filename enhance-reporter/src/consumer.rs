//! Reporting API clients

use crate::call_result::ServiceCallResult;
use enhance_core::config::ConsumerConfig;
use enhance_core::{Error, Result};
use std::time::Duration;

/// Consumer side of the service health subsystem.
///
/// Calls are synchronous and run on the caller's thread.
pub trait ConsumerApi: Send + Sync {
    /// Submit the result of one call
    fn update_service_call_result(&self, result: ServiceCallResult) -> Result<()>;
}

/// Posts call results as JSON to an HTTP endpoint
pub struct HttpConsumerApi {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpConsumerApi {
    /// Create a client from configuration, requires `endpoint`
    pub fn new(config: &ConsumerConfig) -> Result<Self> {
        let endpoint = config
            .endpoint
            .clone()
            .ok_or_else(|| Error::Config("consumer.endpoint is not set".to_string()))?;

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, endpoint })
    }
}

impl ConsumerApi for HttpConsumerApi {
    fn update_service_call_result(&self, result: ServiceCallResult) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&result)
            .send()
            .map_err(|e| Error::Report(format!("POST {} failed: {}", self.endpoint, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Report(format!(
                "POST {} returned {}",
                self.endpoint, status
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call_result::{RetStatus, ServiceKey};
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread;

    fn sample() -> ServiceCallResult {
        ServiceCallResult {
            namespace: "default".to_string(),
            service: "svc-b".to_string(),
            host: "10.0.0.2".to_string(),
            port: 8080,
            method: "/api/x".to_string(),
            ret_code: 200,
            delay_ms: 42,
            caller_service: ServiceKey {
                namespace: "default".to_string(),
                service: "svc-a".to_string(),
            },
            caller_ip: "10.0.0.1".to_string(),
            ret_status: RetStatus::RetSuccess,
            rule_name: None,
        }
    }

    /// Accept one request, answer with `status_line`, return the request body
    fn serve_once(status_line: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);

            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                }
            }
            let mut body = vec![0u8; content_length];
            reader.read_exact(&mut body).unwrap();

            let mut stream = reader.into_inner();
            write!(
                stream,
                "{}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
                status_line
            )
            .unwrap();
            String::from_utf8(body).unwrap()
        });

        (format!("http://{}/report", addr), handle)
    }

    #[test]
    fn test_missing_endpoint() {
        let err = HttpConsumerApi::new(&ConsumerConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_posts_json() {
        let (endpoint, handle) = serve_once("HTTP/1.1 200 OK");
        let api = HttpConsumerApi::new(&ConsumerConfig {
            endpoint: Some(endpoint),
            timeout_ms: 5000,
        })
        .unwrap();

        api.update_service_call_result(sample()).unwrap();

        let body: serde_json::Value = serde_json::from_str(&handle.join().unwrap()).unwrap();
        assert_eq!(body["service"], "svc-b");
        assert_eq!(body["port"], 8080);
        assert_eq!(body["delay_ms"], 42);
        assert_eq!(body["ret_status"], "RetSuccess");
        assert_eq!(body["caller_service"]["service"], "svc-a");
    }

    #[test]
    fn test_non_success_status_is_error() {
        let (endpoint, handle) = serve_once("HTTP/1.1 503 Service Unavailable");
        let api = HttpConsumerApi::new(&ConsumerConfig {
            endpoint: Some(endpoint),
            timeout_ms: 5000,
        })
        .unwrap();

        let err = api.update_service_call_result(sample()).unwrap_err();
        assert!(matches!(err, Error::Report(_)));
        handle.join().unwrap();
    }
}
