//! Transport error types.

use explain10_core::GatewayError;
use thiserror::Error;

/// Errors raised while sending a request to the upstream API.
///
/// A non-2xx status is *not* a transport error; it arrives as a
/// [`RawUpstreamResult`](crate::types::RawUpstreamResult) so the gateway can
/// classify it.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Request timed out.
    #[error("Upstream request timed out after {0}ms")]
    Timeout(u64),

    /// Upstream host could not be reached.
    #[error("Upstream provider unavailable: {0}")]
    Unavailable(String),

    /// HTTP request failed mid-flight or the body could not be read.
    #[error("Upstream request failed: {0}")]
    RequestFailed(String),

    /// The request could not be built (bad URL, header, or body).
    #[error("Failed to build upstream request: {0}")]
    Internal(String),
}

impl TransportError {
    /// Classify `reqwest` failures. `timeout_ms` is the budget that applied.
    #[must_use]
    pub fn from_reqwest(err: &reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_ms)
        } else if err.is_connect() {
            Self::Unavailable(err.to_string())
        } else if err.is_builder() {
            Self::Internal(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

impl From<TransportError> for GatewayError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Internal(detail) => GatewayError::unexpected(detail),
            other => GatewayError::upstream("Upstream API request failed.")
                .with_details(other.to_string()),
        }
    }
}
