//! Wire-level request and response values exchanged with the upstream API.

use serde_json::Value;

/// A fully-built upstream HTTP request.
#[derive(Debug, Clone, PartialEq)]
pub struct WireRequest {
    /// Absolute endpoint URL.
    pub url: String,
    /// Extra headers (auth, API keys). `Content-Type: application/json` is implied.
    pub headers: Vec<(String, String)>,
    /// JSON body.
    pub body: Value,
}

impl WireRequest {
    /// Create a POST request to `url` carrying `body`.
    #[must_use]
    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            body,
        }
    }

    /// Add a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Outcome of a single upstream attempt. Never retained past the attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct RawUpstreamResult {
    /// Whether the status was 2xx.
    pub succeeded: bool,
    /// HTTP status code.
    pub status: u16,
    /// Full response body, read regardless of status.
    pub raw_body: String,
    /// The body parsed as JSON, when it is JSON.
    pub parsed_body: Option<Value>,
    /// Wall-clock latency of the attempt in milliseconds.
    pub latency_ms: u64,
}

impl RawUpstreamResult {
    /// Build a result from a status and body, parsing the body when possible.
    #[must_use]
    pub fn new(status: u16, raw_body: impl Into<String>) -> Self {
        let raw_body = raw_body.into();
        let parsed_body = serde_json::from_str(&raw_body).ok();
        Self {
            succeeded: (200..300).contains(&status),
            status,
            raw_body,
            parsed_body,
            latency_ms: 0,
        }
    }

    /// Record the attempt latency.
    #[must_use]
    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_follows_2xx_range() {
        assert!(RawUpstreamResult::new(200, "{}").succeeded);
        assert!(RawUpstreamResult::new(204, "").succeeded);
        assert!(!RawUpstreamResult::new(404, "{}").succeeded);
        assert!(!RawUpstreamResult::new(301, "").succeeded);
    }

    #[test]
    fn body_is_parsed_when_json() {
        let ok = RawUpstreamResult::new(200, r#"{"a":1}"#);
        assert_eq!(ok.parsed_body.as_ref().and_then(|v| v["a"].as_i64()), Some(1));

        let html = RawUpstreamResult::new(502, "<html>Bad Gateway</html>");
        assert!(html.parsed_body.is_none());
        assert_eq!(html.raw_body, "<html>Bad Gateway</html>");
    }
}
