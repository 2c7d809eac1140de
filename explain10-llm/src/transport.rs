//! HTTP transport to the upstream generation API.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::error::TransportError;
use crate::types::{RawUpstreamResult, WireRequest};

/// Sends one wire request and returns the raw outcome.
///
/// Implementations must read the whole body regardless of status and must
/// not retry; fallback across models is the gateway's job.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and wait for the full response.
    async fn send(&self, request: &WireRequest) -> Result<RawUpstreamResult, TransportError>;
}

/// `reqwest`-backed transport with a per-attempt timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
    timeout_ms: u64,
}

impl HttpTransport {
    /// Create a transport whose every request is bounded by `timeout_ms`.
    #[must_use]
    pub fn new(timeout_ms: u64) -> Self {
        Self {
            http: Client::new(),
            timeout_ms,
        }
    }

    /// Reuse an existing client (shared connection pool).
    #[must_use]
    pub fn with_client(http: Client, timeout_ms: u64) -> Self {
        Self { http, timeout_ms }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &WireRequest) -> Result<RawUpstreamResult, TransportError> {
        let mut builder = self
            .http
            .post(&request.url)
            .json(&request.body)
            .timeout(Duration::from_millis(self.timeout_ms));
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let start = Instant::now();
        let resp = builder.send().await.map_err(|e| {
            let err = TransportError::from_reqwest(&e, self.timeout_ms);
            warn!(error = %err, "Upstream request failed before a response arrived");
            err
        })?;

        let status = resp.status().as_u16();
        let raw = resp
            .text()
            .await
            .map_err(|e| TransportError::from_reqwest(&e, self.timeout_ms))?;
        let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        debug!(status, latency_ms, bytes = raw.len(), "Upstream responded");
        Ok(RawUpstreamResult::new(status, raw).with_latency(latency_ms))
    }
}
