//! Error taxonomy for the Explain10 gateway.
//!
//! Every failure the gateway can report is classified into one of a small set
//! of [`ErrorCode`]s. Upstream, transport and parsing failures never leave the
//! gateway unclassified.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Classification of a gateway failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// No credential configured for the selected upstream provider.
    MissingApiKey,
    /// Caller input failed validation.
    InvalidInput,
    /// The upstream does not know the requested model. Internal fallback signal.
    ModelNotFound,
    /// Upstream rate or usage limit hit.
    QuotaExceeded,
    /// Upstream rejected the credential.
    Forbidden,
    /// Any other upstream failure, including candidate exhaustion and timeouts.
    UpstreamError,
    /// Upstream answered 2xx but the content is not recoverable JSON.
    UnparsableResponse,
    /// Internal fault.
    UnexpectedError,
}

impl ErrorCode {
    /// Wire spelling (`snake_case`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingApiKey => "missing_api_key",
            Self::InvalidInput => "invalid_input",
            Self::ModelNotFound => "model_not_found",
            Self::QuotaExceeded => "quota_exceeded",
            Self::Forbidden => "forbidden",
            Self::UpstreamError => "upstream_error",
            Self::UnparsableResponse => "unparsable_response",
            Self::UnexpectedError => "unexpected_error",
        }
    }

    /// HTTP status surfaced for this code when no more specific status applies.
    #[must_use]
    pub fn default_status(self) -> u16 {
        match self {
            Self::InvalidInput => 400,
            Self::Forbidden => 403,
            Self::ModelNotFound => 404,
            Self::QuotaExceeded => 429,
            Self::MissingApiKey | Self::UnexpectedError => 500,
            Self::UpstreamError | Self::UnparsableResponse => 502,
        }
    }

    /// Whether the gateway may move on to the next candidate model after this failure.
    #[must_use]
    pub fn is_model_level(self) -> bool {
        matches!(self, Self::ModelNotFound | Self::UnparsableResponse)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified gateway failure.
///
/// Serializes to the HTTP error body shape
/// `{ error, code, model?, details?, attemptedModels?, lastError? }`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct GatewayError {
    /// HTTP status to surface.
    #[serde(skip)]
    pub status: u16,
    /// Error classification.
    pub code: ErrorCode,
    /// Human-readable message.
    #[serde(rename = "error")]
    pub message: String,
    /// Model identifier the failure relates to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Diagnostic detail (raw upstream body, transport message).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Every candidate model tried, in order. Only set on exhaustion.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attempted_models: Vec<String>,
    /// Last per-model failure recorded before exhaustion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<Box<GatewayError>>,
}

impl GatewayError {
    /// Create an error with the code's default status.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status: code.default_status(),
            code,
            message: message.into(),
            model: None,
            details: None,
            attempted_models: Vec::new(),
            last_error: None,
        }
    }

    /// Caller input failed validation (400).
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// No credential configured (500).
    #[must_use]
    pub fn missing_api_key(provider: &str) -> Self {
        Self::new(
            ErrorCode::MissingApiKey,
            format!("Missing API key for the '{provider}' provider in server environment."),
        )
    }

    /// Model not available for this key / API version (404, fallback signal).
    #[must_use]
    pub fn model_not_found(model: &str, details: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ModelNotFound,
            "Model not found for this API key/version. Trying fallback model.",
        )
        .with_model(model)
        .with_details(details)
    }

    /// Upstream rate or usage limit (429).
    #[must_use]
    pub fn quota_exceeded(model: &str, details: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::QuotaExceeded,
            "The upstream API quota has been exceeded. Please try again later.",
        )
        .with_model(model)
        .with_details(details)
    }

    /// Credential rejected. `status` keeps the upstream's 401 or 403.
    #[must_use]
    pub fn forbidden(status: u16, model: &str, details: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::Forbidden,
            "The upstream API rejected the configured credential.",
        )
        .with_status(status)
        .with_model(model)
        .with_details(details)
    }

    /// Any other upstream failure (502).
    #[must_use]
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpstreamError, message)
    }

    /// Upstream content could not be parsed as JSON (502, retried across candidates).
    #[must_use]
    pub fn unparsable_response(model: &str, details: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::UnparsableResponse,
            "The upstream API returned an unparsable response.",
        )
        .with_model(model)
        .with_details(details)
    }

    /// Internal fault (500).
    #[must_use]
    pub fn unexpected(details: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnexpectedError, "Unexpected server error.").with_details(details)
    }

    /// Every candidate failed at model level (502).
    #[must_use]
    pub fn exhausted(attempted: Vec<String>, last_error: Option<GatewayError>) -> Self {
        let mut err = Self::upstream("Upstream API request failed for all configured models.");
        err.attempted_models = attempted;
        err.last_error = last_error.map(Box::new);
        err
    }

    /// Override the HTTP status.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Attach the related model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Attach diagnostic detail. Empty detail is dropped.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        let details = details.into();
        self.details = (!details.is_empty()).then_some(details);
        self
    }
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, GatewayError>;
