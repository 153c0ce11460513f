//! Transports that actually move a request over the wire.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::{FetchError, Method, RequestBuilder, Response};

/// Something that can execute a request and produce a response.
///
/// Non-2xx statuses are returned as `Ok(Response)`; only failures to
/// complete the exchange are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a single request.
    async fn execute(&self, request: RequestBuilder) -> Result<Response, FetchError>;
}

/// Timeout configuration for the HTTP transport.
#[derive(Debug, Clone, Copy)]
pub struct TimeoutConfig {
    /// Connection timeout.
    pub connect: Duration,
    /// Total operation timeout.
    pub total: Duration,
}

impl TimeoutConfig {
    /// Create from a single total timeout.
    pub fn from_total(total: Duration) -> Self {
        Self {
            connect: total / 4,
            total,
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self::from_total(Duration::from_secs(10))
    }
}

/// Transport backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport with the given timeouts.
    pub fn new(timeouts: TimeoutConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeouts.connect)
            .timeout(timeouts.total)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let url = request.full_url()?;
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };

        tracing::debug!(method = request.method.as_str(), %url, "sending request");

        let mut builder = self.client.request(method, url);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await?.to_vec();

        tracing::debug!(status, bytes = body.len(), "received response");

        Ok(Response::new(status, headers, body))
    }
}
