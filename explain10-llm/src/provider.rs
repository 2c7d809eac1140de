//! Upstream provider capabilities.
//!
//! Each provider knows how to wrap a prompt into its own wire request and how
//! to dig the generated text out of its response envelope. Everything else
//! (fallback, parsing, classification) lives in the gateway and is shared.

use std::sync::Arc;

use explain10_core::config::{ProviderKind, UpstreamConfig};
use serde_json::{Value, json};

use crate::types::WireRequest;

/// Public Gemini API base.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Public OpenAI API base.
pub const OPENAI_API_BASE: &str = "https://api.openai.com";
/// Local Ollama base.
pub const OLLAMA_API_BASE: &str = "http://localhost:11434";

/// Gemini models tried in order when no override is configured.
pub const GEMINI_DEFAULT_MODELS: &[&str] = &[
    "gemini-1.5-flash-latest",
    "gemini-1.5-flash",
    "gemini-2.0-flash",
    "gemini-2.0-flash-lite",
];

/// OpenAI models tried in order when no override is configured.
pub const OPENAI_DEFAULT_MODELS: &[&str] = &["gpt-4o-mini", "gpt-4.1-mini", "gpt-3.5-turbo"];

/// Ollama model used when no override is configured.
pub const OLLAMA_DEFAULT_MODEL: &str = "qwen2.5:1.5b";

/// Provider-specific request building and envelope parsing.
pub trait UpstreamProvider: Send + Sync {
    /// Short identifier used in logs and the health endpoint.
    fn name(&self) -> &'static str;

    /// Whether a credential must be configured before any call.
    fn requires_api_key(&self) -> bool {
        true
    }

    /// Whether several model identifiers may be tried in sequence.
    fn supports_model_fallback(&self) -> bool {
        true
    }

    /// Built-in candidate models, in order.
    fn default_models(&self) -> Vec<String>;

    /// Wrap `prompt` into a wire request for `model`.
    fn build_request(
        &self,
        model: &str,
        prompt: &str,
        temperature: f32,
        api_key: Option<&str>,
    ) -> WireRequest;

    /// Extract the generated text from a 2xx response body.
    fn parse_envelope(&self, body: &Value) -> Option<String>;
}

fn base_or(base_url: &str, default: &str) -> String {
    let base = base_url.trim();
    let base = if base.is_empty() { default } else { base };
    base.trim_end_matches('/').to_string()
}

fn owned(models: &[&str]) -> Vec<String> {
    models.iter().map(|m| (*m).to_string()).collect()
}

// ---------------------------------------------------------------------------
// Gemini
// ---------------------------------------------------------------------------

/// Google Gemini `generateContent`.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    base_url: String,
}

impl GeminiProvider {
    /// Create a provider. An empty `base_url` selects the public API.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_or(base_url, GEMINI_API_BASE),
        }
    }
}

impl UpstreamProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn default_models(&self) -> Vec<String> {
        owned(GEMINI_DEFAULT_MODELS)
    }

    fn build_request(
        &self,
        model: &str,
        prompt: &str,
        temperature: f32,
        api_key: Option<&str>,
    ) -> WireRequest {
        let url = format!("{}/models/{model}:generateContent", self.base_url);
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": temperature,
                "responseMimeType": "application/json",
            }
        });
        let request = WireRequest::post(url, body);
        match api_key {
            Some(key) => request.with_header("x-goog-api-key", key),
            None => request,
        }
    }

    fn parse_envelope(&self, body: &Value) -> Option<String> {
        body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::to_string)
    }
}

// ---------------------------------------------------------------------------
// OpenAI-compatible
// ---------------------------------------------------------------------------

/// OpenAI-compatible chat completions (also Together, Groq, vLLM, etc.).
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleProvider {
    base_url: String,
}

impl OpenAiCompatibleProvider {
    /// Create a provider. An empty `base_url` selects the public API.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_or(base_url, OPENAI_API_BASE),
        }
    }
}

impl UpstreamProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn default_models(&self) -> Vec<String> {
        owned(OPENAI_DEFAULT_MODELS)
    }

    fn build_request(
        &self,
        model: &str,
        prompt: &str,
        temperature: f32,
        api_key: Option<&str>,
    ) -> WireRequest {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = json!({
            "model": model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": temperature,
            "response_format": { "type": "json_object" },
        });
        let request = WireRequest::post(url, body);
        match api_key {
            Some(key) => request.with_header("Authorization", format!("Bearer {key}")),
            None => request,
        }
    }

    fn parse_envelope(&self, body: &Value) -> Option<String> {
        body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
    }
}

// ---------------------------------------------------------------------------
// Ollama
// ---------------------------------------------------------------------------

/// Local Ollama `api/generate`. No credential, one model.
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    base_url: String,
}

impl OllamaProvider {
    /// Create a provider. An empty `base_url` selects `localhost:11434`.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_or(base_url, OLLAMA_API_BASE),
        }
    }
}

impl UpstreamProvider for OllamaProvider {
    fn name(&self) -> &'static str {
        "ollama"
    }

    fn requires_api_key(&self) -> bool {
        false
    }

    fn supports_model_fallback(&self) -> bool {
        false
    }

    fn default_models(&self) -> Vec<String> {
        vec![OLLAMA_DEFAULT_MODEL.to_string()]
    }

    fn build_request(
        &self,
        model: &str,
        prompt: &str,
        temperature: f32,
        _api_key: Option<&str>,
    ) -> WireRequest {
        let url = format!("{}/api/generate", self.base_url);
        WireRequest::post(
            url,
            json!({
                "model": model,
                "prompt": prompt,
                "stream": false,
                "format": "json",
                "options": { "temperature": temperature },
            }),
        )
    }

    fn parse_envelope(&self, body: &Value) -> Option<String> {
        body["response"].as_str().map(str::to_string)
    }
}

/// Build the provider selected by configuration.
#[must_use]
pub fn provider_from_config(config: &UpstreamConfig) -> Arc<dyn UpstreamProvider> {
    match config.provider {
        ProviderKind::Gemini => Arc::new(GeminiProvider::new(&config.base_url)),
        ProviderKind::OpenAi => Arc::new(OpenAiCompatibleProvider::new(&config.base_url)),
        ProviderKind::Ollama => Arc::new(OllamaProvider::new(&config.base_url)),
    }
}
