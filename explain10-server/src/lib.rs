//! # explain10-server: HTTP surface for Explain10
//!
//! Route layout:
//! ```text
//! /explain   POST   explain a topic
//! /explain   *      405 Method not allowed
//! /health    GET    liveness + selected provider
//! ```
//!
//! The binary (`explain10`) loads configuration, initializes tracing and serves
//! [`build_router`]. Everything here is usable from tests without a socket.

#![deny(clippy::unwrap_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod error;
pub mod telemetry;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use explain10_core::ExplainConfig;
use explain10_core::config::ServerConfig;
use explain10_llm::Gateway;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    /// Upstream gateway. Stateless, shared by all requests.
    pub gateway: Arc<Gateway>,
    /// Answer `quota_exceeded` with the local canned explanation.
    pub local_on_quota: bool,
    /// Cancelled on shutdown; every request derives a child token from it.
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Create state around an existing gateway.
    #[must_use]
    pub fn new(gateway: Gateway, local_on_quota: bool, shutdown: CancellationToken) -> Self {
        Self {
            gateway: Arc::new(gateway),
            local_on_quota,
            shutdown,
        }
    }

    /// Create state with an HTTP gateway built from configuration.
    #[must_use]
    pub fn from_config(config: &ExplainConfig, shutdown: CancellationToken) -> Self {
        Self::new(
            Gateway::from_config(&config.upstream),
            config.fallback.local_on_quota,
            shutdown,
        )
    }
}

/// Build the application router with its middleware stack.
#[must_use]
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    let router = Router::new()
        .route("/explain", post(api::explain).fallback(api::method_not_allowed))
        .route("/health", get(api::health))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if server.cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
