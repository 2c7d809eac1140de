//! Tracing subscriber setup.

use explain10_core::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Filter directive for the configured level: our crates at `level`,
/// dependencies at `warn`.
#[must_use]
pub fn default_directive(level: &str) -> String {
    format!(
        "explain10={level},explain10_server={level},explain10_llm={level},explain10_core={level},tower_http={level},warn"
    )
}

/// Install the global subscriber. `RUST_LOG` takes precedence over config.
///
/// # Errors
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&config.level)));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let installed = if config.json {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_scopes_our_crates() {
        let directive = default_directive("debug");
        assert!(directive.starts_with("explain10=debug,"));
        assert!(directive.contains("explain10_llm=debug"));
        assert!(directive.ends_with(",warn"));
        assert!(EnvFilter::try_new(&directive).is_ok());
    }
}
