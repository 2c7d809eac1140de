//! # explain10-llm: Generation Gateway for Explain10
//!
//! Turns an [`ExplainRequest`](explain10_core::ExplainRequest) into an
//! [`ExplainResult`](explain10_core::ExplainResult) by calling an upstream
//! text-generation API:
//!   - **Gemini** (`generateContent`, default)
//!   - **OpenAI-compatible API** (chat completions)
//!   - **Ollama** (local, single model)
//!
//! All upstream calls go through the [`Gateway`], which owns:
//!   - Candidate model fallback (404 → next model)
//!   - Per-attempt timeouts
//!   - Lenient JSON extraction and normalization
//!   - Failure classification into [`ErrorCode`](explain10_core::ErrorCode)s
//!
//! # Flow
//!
//! ```text
//! caller → Gateway → prompt::build_prompt → Transport (HTTP) → provider envelope
//!        ← ExplainResult ← extract::normalize ← extract::parse_lenient ←┘
//! ```

pub mod candidates;
pub mod error;
pub mod extract;
pub mod gateway;
pub mod prompt;
pub mod provider;
pub mod transport;
pub mod types;

pub use error::TransportError;
pub use gateway::{Gateway, GatewaySettings};
pub use provider::{UpstreamProvider, provider_from_config};
pub use transport::{HttpTransport, Transport};
pub use types::{RawUpstreamResult, WireRequest};
