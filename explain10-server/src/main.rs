//! Explain10 server entry point.
//!
//! Wires together:
//!   - CLI parsing and configuration loading (file + environment overlay)
//!   - Tracing
//!   - The generation gateway for the configured provider
//!   - The HTTP router
//!   - Graceful shutdown on SIGTERM / SIGINT, cancelling in-flight upstream calls

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use explain10_core::ExplainConfig;
use explain10_server::{AppState, build_router, telemetry};
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;

/// Config file looked up in the working directory when none is given.
const DEFAULT_CONFIG: &str = "explain10.toml";

#[derive(Debug, Parser)]
#[command(name = "explain10", version, about = "Explain any topic simply")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, env = "EXPLAIN10_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    config.apply_env().context("invalid environment override")?;

    telemetry::init_tracing(&config.logging)?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        provider = %config.upstream.provider,
        "Starting explain10"
    );

    let shutdown = CancellationToken::new();
    let state = AppState::from_config(&config, shutdown.clone());
    if !state.gateway.has_credentials() {
        tracing::warn!(
            provider = state.gateway.provider_name(),
            "No API key configured; /explain will answer missing_api_key"
        );
    }
    tracing::debug!(candidates = ?state.gateway.candidates(), "Candidate models");

    let app = build_router(state, &config.server);

    let listener = TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind))?;
    tracing::info!(addr = %config.server.bind, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    tracing::info!("Shut down gracefully");
    Ok(())
}

/// Load the explicit config file, or the default one if present, or defaults.
fn load_config(path: Option<&Path>) -> anyhow::Result<ExplainConfig> {
    match path {
        Some(path) => ExplainConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => {
            let default = Path::new(DEFAULT_CONFIG);
            if default.exists() {
                ExplainConfig::from_file(default)
                    .with_context(|| format!("failed to load config {DEFAULT_CONFIG}"))
            } else {
                Ok(ExplainConfig::default())
            }
        }
    }
}

/// Wait for SIGTERM or Ctrl+C, then cancel in-flight work.
async fn shutdown_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
    token.cancel();
}
