//! Request handlers.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use explain10_core::fallback::local_explanation;
use explain10_core::{ErrorCode, ExplainRequest, GatewayError, Level, Style};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{Instrument, info, warn};

use crate::AppState;
use crate::error::ApiError;

/// Response header marking a locally synthesized explanation.
pub const SOURCE_HEADER: &str = "x-explain-source";

/// `POST /explain` body. Every field is optional at the wire level so that
/// missing values are reported as `invalid_input` rather than a framework error.
#[derive(Debug, Default, Deserialize)]
pub struct ExplainBody {
    /// Topic to explain.
    #[serde(default)]
    pub topic: Option<String>,
    /// `Kid` | `Teen` | `Expert`, default `Kid`.
    #[serde(default)]
    pub level: Option<String>,
    /// `Simple` | `Analogy` | `Step-by-step`, default `Simple`.
    #[serde(default)]
    pub style: Option<String>,
}

impl ExplainBody {
    /// Validate into a gateway request, applying defaults.
    ///
    /// # Errors
    /// `invalid_input` for an unknown level or style, or a topic that is too short.
    pub fn into_request(self) -> Result<ExplainRequest, GatewayError> {
        let level = self
            .level
            .as_deref()
            .map(str::parse::<Level>)
            .transpose()?
            .unwrap_or_default();
        let style = self
            .style
            .as_deref()
            .map(str::parse::<Style>)
            .transpose()?
            .unwrap_or_default();
        ExplainRequest::new(self.topic.as_deref().unwrap_or_default(), level, style)
    }
}

/// POST /explain
pub async fn explain(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ExplainBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let request_id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| uuid::Uuid::new_v4().to_string(), str::to_string);
    let span = tracing::info_span!("explain", request_id = %request_id);

    handle_explain(state, payload).instrument(span).await
}

async fn handle_explain(
    state: AppState,
    payload: Result<Json<ExplainBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        GatewayError::invalid_input("Request body must be a JSON object with a 'topic' field.")
            .with_details(rejection.body_text())
    })?;
    let request = body.into_request()?;
    info!(
        level = %request.level,
        style = %request.style,
        topic_chars = request.topic.chars().count(),
        "Explain request"
    );

    let cancel = state.shutdown.child_token();
    match state.gateway.explain_with_cancel(&request, &cancel).await {
        Ok(result) => Ok(Json(result).into_response()),
        Err(err) if err.code == ErrorCode::QuotaExceeded && state.local_on_quota => {
            warn!(model = ?err.model, "Quota exceeded, answering with local explanation");
            let result = local_explanation(&request);
            Ok(([(SOURCE_HEADER, "local-fallback")], Json(result)).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// Any method other than POST on `/explain`.
pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
}

/// `GET /health` body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process serves requests.
    pub status: &'static str,
    /// Selected upstream provider.
    pub provider: &'static str,
    /// Server version.
    pub version: &'static str,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        provider: state.gateway.provider_name(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_defaults_level_and_style() {
        let body = ExplainBody {
            topic: Some("  gravity ".into()),
            ..ExplainBody::default()
        };
        let request = body.into_request().expect("valid");
        assert_eq!(request.topic, "gravity");
        assert_eq!(request.level, Level::Kid);
        assert_eq!(request.style, Style::Simple);
    }

    #[test]
    fn body_parses_wire_spellings() {
        let body: ExplainBody =
            serde_json::from_str(r#"{"topic":"tides","level":"Expert","style":"Step-by-step"}"#)
                .expect("json");
        let request = body.into_request().expect("valid");
        assert_eq!(request.level, Level::Expert);
        assert_eq!(request.style, Style::StepByStep);
    }

    #[test]
    fn unknown_level_is_invalid_input() {
        let body = ExplainBody {
            topic: Some("tides".into()),
            level: Some("Toddler".into()),
            ..ExplainBody::default()
        };
        let err = body.into_request().expect_err("unknown level");
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn missing_topic_is_invalid_input() {
        let err = ExplainBody::default().into_request().expect_err("no topic");
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(err.status, 400);
    }
}
