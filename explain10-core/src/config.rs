//! Configuration for Explain10.
//!
//! Maps to `explain10.toml`. Every field has a default, so an empty file (or
//! no file at all) is a valid configuration. Deployment secrets normally come
//! from the environment; see [`ExplainConfig::apply_env_with`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable holding the upstream credential.
pub const ENV_API_KEY: &str = "API_KEY";
/// Environment variable holding the preferred model identifier.
pub const ENV_MODEL_OVERRIDE: &str = "MODEL_OVERRIDE";
/// Legacy alias for [`ENV_API_KEY`].
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
/// Legacy alias for [`ENV_MODEL_OVERRIDE`].
pub const ENV_GEMINI_MODEL: &str = "GEMINI_MODEL";
/// Selects the upstream provider.
pub const ENV_PROVIDER: &str = "EXPLAIN10_PROVIDER";
/// Overrides the listen address.
pub const ENV_BIND: &str = "EXPLAIN10_BIND";
/// Overrides the per-attempt timeout (milliseconds).
pub const ENV_TIMEOUT_MS: &str = "EXPLAIN10_TIMEOUT_MS";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document is malformed or has wrong field types.
    #[error("Configuration parse error: {0}")]
    Parse(String),

    /// An environment variable holds an unusable value.
    #[error("Invalid value for {name}: {reason}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level Explain10 configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExplainConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream generation API settings.
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Degradation policy.
    #[serde(default)]
    pub fallback: FallbackConfig,
    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ExplainConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Overlay values from the process environment.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidEnv` if a variable cannot be interpreted.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_with(|name| std::env::var(name).ok())
    }

    /// Overlay values using `lookup` as the environment.
    ///
    /// `API_KEY` wins over `GEMINI_API_KEY` and `MODEL_OVERRIDE` over
    /// `GEMINI_MODEL`. Blank values are ignored.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidEnv` if a variable cannot be interpreted.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(key) = get(ENV_API_KEY).or_else(|| get(ENV_GEMINI_API_KEY)) {
            self.upstream.api_key = Some(key);
        }
        if let Some(model) = get(ENV_MODEL_OVERRIDE).or_else(|| get(ENV_GEMINI_MODEL)) {
            self.upstream.model_override = Some(model);
        }
        if let Some(provider) = get(ENV_PROVIDER) {
            self.upstream.provider = provider.parse().map_err(|reason| ConfigError::InvalidEnv {
                name: ENV_PROVIDER,
                reason,
            })?;
        }
        if let Some(bind) = get(ENV_BIND) {
            self.server.bind = bind;
        }
        if let Some(timeout) = get(ENV_TIMEOUT_MS) {
            self.upstream.timeout_ms =
                timeout.parse().map_err(|e: std::num::ParseIntError| ConfigError::InvalidEnv {
                    name: ENV_TIMEOUT_MS,
                    reason: e.to_string(),
                })?;
        }
        Ok(())
    }

    /// Credential for the selected provider, if one is configured and non-blank.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.upstream
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Allow any origin to call the API (the UI is usually served elsewhere).
    #[serde(default = "default_true")]
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            cors_permissive: true,
        }
    }
}

/// Which upstream generation API to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Google Gemini `generateContent`.
    #[default]
    Gemini,
    /// OpenAI-compatible chat completions.
    #[serde(rename = "openai")]
    OpenAi,
    /// Local Ollama `api/generate`.
    Ollama,
}

impl ProviderKind {
    /// Config spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
            Self::Ollama => "ollama",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "openai" => Ok(Self::OpenAi),
            "ollama" => Ok(Self::Ollama),
            _ => Err(format!("unknown provider: '{s}' (expected gemini, openai or ollama)")),
        }
    }
}

/// Upstream generation API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Provider: "gemini", "openai", "ollama".
    #[serde(default)]
    pub provider: ProviderKind,
    /// Base URL. Empty means the provider's public default.
    #[serde(default)]
    pub base_url: String,
    /// Credential. Usually supplied through `API_KEY` instead.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Preferred model, tried before the fallback list.
    #[serde(default)]
    pub model_override: Option<String>,
    /// Replaces the provider's built-in fallback model list when set.
    #[serde(default)]
    pub fallback_models: Option<Vec<String>>,
    /// Sampling temperature sent with every attempt.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Hard timeout for a single model attempt in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            base_url: String::new(),
            api_key: None,
            model_override: None,
            fallback_models: None,
            temperature: default_temperature(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Degradation policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FallbackConfig {
    /// Answer with the local canned explanation when the upstream quota is exhausted.
    #[serde(default)]
    pub local_on_quota: bool,
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_true() -> bool { true }
fn default_bind() -> String { "127.0.0.1:3000".to_string() }
fn default_log_level() -> String { "info".to_string() }
fn default_temperature() -> f32 { 0.5 }
fn default_timeout_ms() -> u64 { 20_000 }
