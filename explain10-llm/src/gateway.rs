//! Generation gateway: request validation, candidate fallback, response
//! normalization and failure classification.
//!
//! ## Fallback policy
//!
//! Candidates are tried strictly in order, one network call each, no backoff.
//!
//! | upstream outcome            | classification        | next candidate? |
//! |-----------------------------|-----------------------|-----------------|
//! | 2xx, content parses         | success               | stop            |
//! | 2xx, content unparsable     | `unparsable_response` | yes             |
//! | 404                         | `model_not_found`     | yes             |
//! | 429                         | `quota_exceeded`      | no              |
//! | 401 / 403                   | `forbidden`           | no              |
//! | other status, timeout, I/O  | `upstream_error`      | no              |
//!
//! A wrong model name is model-level; quota and credential failures are the
//! same for every model and end the loop.

use std::sync::Arc;

use explain10_core::config::UpstreamConfig;
use explain10_core::{ExplainRequest, ExplainResult, GatewayError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::candidates::resolve_candidates;
use crate::extract::extract_result;
use crate::prompt::build_prompt;
use crate::provider::{UpstreamProvider, provider_from_config};
use crate::transport::{HttpTransport, Transport};
use crate::types::RawUpstreamResult;

/// Upper bound on diagnostic text copied from upstream bodies.
const MAX_DETAIL_CHARS: usize = 4096;

/// Per-deployment gateway settings.
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    /// Upstream credential.
    pub api_key: Option<String>,
    /// Preferred model, tried first.
    pub model_override: Option<String>,
    /// Replaces the provider's default candidate list when set.
    pub fallback_models: Option<Vec<String>>,
    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model_override: None,
            fallback_models: None,
            temperature: 0.5,
        }
    }
}

impl GatewaySettings {
    /// Take the gateway-relevant part of the upstream configuration.
    #[must_use]
    pub fn from_config(config: &UpstreamConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            model_override: config.model_override.clone(),
            fallback_models: config.fallback_models.clone(),
            temperature: config.temperature,
        }
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

/// Stateless gateway to the upstream generation API.
///
/// Cheap to share behind an `Arc`; holds no per-request state.
pub struct Gateway {
    provider: Arc<dyn UpstreamProvider>,
    transport: Arc<dyn Transport>,
    settings: GatewaySettings,
}

impl Gateway {
    /// Create a gateway from its parts.
    #[must_use]
    pub fn new(
        provider: Arc<dyn UpstreamProvider>,
        transport: Arc<dyn Transport>,
        settings: GatewaySettings,
    ) -> Self {
        Self {
            provider,
            transport,
            settings,
        }
    }

    /// Create a gateway with the configured provider over HTTP.
    #[must_use]
    pub fn from_config(config: &UpstreamConfig) -> Self {
        Self::new(
            provider_from_config(config),
            Arc::new(HttpTransport::new(config.timeout_ms)),
            GatewaySettings::from_config(config),
        )
    }

    /// Name of the selected provider.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Whether the provider's credential requirement is satisfied.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.provider.requires_api_key() || self.settings.api_key().is_some()
    }

    /// Candidate models in the order they will be tried.
    #[must_use]
    pub fn candidates(&self) -> Vec<String> {
        let defaults = self
            .settings
            .fallback_models
            .clone()
            .unwrap_or_else(|| self.provider.default_models());
        resolve_candidates(
            self.settings.model_override.as_deref(),
            &defaults,
            self.provider.supports_model_fallback(),
        )
    }

    /// Explain a topic.
    ///
    /// # Errors
    /// Returns a classified [`GatewayError`]; see the module docs for the policy.
    pub async fn explain(&self, request: &ExplainRequest) -> Result<ExplainResult, GatewayError> {
        self.explain_with_cancel(request, &CancellationToken::new())
            .await
    }

    /// Explain a topic, aborting the in-flight attempt when `cancel` fires.
    ///
    /// Cancellation skips the remaining candidates and reports `upstream_error`.
    ///
    /// # Errors
    /// Returns a classified [`GatewayError`]; see the module docs for the policy.
    pub async fn explain_with_cancel(
        &self,
        request: &ExplainRequest,
        cancel: &CancellationToken,
    ) -> Result<ExplainResult, GatewayError> {
        request.validate()?;

        let api_key = self.settings.api_key();
        if self.provider.requires_api_key() && api_key.is_none() {
            error!(provider = self.provider.name(), "No API key configured");
            return Err(GatewayError::missing_api_key(self.provider.name()));
        }

        let candidates = self.candidates();
        if candidates.is_empty() {
            error!(provider = self.provider.name(), "No candidate models configured");
            return Err(GatewayError::unexpected("No candidate models configured."));
        }

        let prompt = build_prompt(request.topic.trim(), request.level, request.style);
        let mut last_error: Option<GatewayError> = None;

        for (attempt, model) in candidates.iter().enumerate() {
            debug!(
                provider = self.provider.name(),
                model = %model,
                attempt = attempt + 1,
                of = candidates.len(),
                "Calling upstream"
            );

            let wire = self
                .provider
                .build_request(model, &prompt, self.settings.temperature, api_key);

            let sent = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    info!(model = %model, "Explain request cancelled by caller");
                    return Err(GatewayError::upstream(
                        "Request was cancelled before the upstream responded.",
                    )
                    .with_model(model.as_str()));
                }
                sent = self.transport.send(&wire) => sent,
            };

            let raw = match sent {
                Ok(raw) => raw,
                Err(e) => {
                    let err = GatewayError::from(e).with_model(model.as_str());
                    warn!(model = %model, code = %err.code, details = ?err.details, "Upstream transport failure");
                    return Err(err);
                }
            };

            match self.classify(model, &raw) {
                Ok(result) => {
                    info!(
                        model = %model,
                        latency_ms = raw.latency_ms,
                        questions = result.curious_questions.len(),
                        "Explanation generated"
                    );
                    return Ok(result);
                }
                Err(err) if err.code.is_model_level() => {
                    debug!(model = %model, status = raw.status, code = %err.code, "Trying next candidate");
                    last_error = Some(err);
                }
                Err(err) => {
                    warn!(model = %model, status = raw.status, code = %err.code, "Upstream request failed");
                    return Err(err);
                }
            }
        }

        warn!(attempted = ?candidates, "All candidate models failed");
        Err(GatewayError::exhausted(candidates, last_error))
    }

    /// Turn one attempt's raw outcome into a result or a classified error.
    fn classify(&self, model: &str, raw: &RawUpstreamResult) -> Result<ExplainResult, GatewayError> {
        if raw.succeeded {
            let text = raw
                .parsed_body
                .as_ref()
                .and_then(|body| self.provider.parse_envelope(body))
                .unwrap_or_default();
            return extract_result(&text)
                .ok_or_else(|| GatewayError::unparsable_response(model, clip(&text)));
        }

        let details = clip(&raw.raw_body);
        Err(match raw.status {
            404 => GatewayError::model_not_found(model, details),
            429 => GatewayError::quota_exceeded(model, details),
            401 | 403 => GatewayError::forbidden(raw.status, model, details),
            _ => GatewayError::upstream("Upstream API request failed.")
                .with_model(model)
                .with_details(details),
        })
    }
}

fn clip(text: &str) -> String {
    match text.char_indices().nth(MAX_DETAIL_CHARS) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}
