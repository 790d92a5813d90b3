//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Pick the output format for the environment
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for production, pretty format for development
//! - `RUST_LOG` overrides the configured level

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};
use crate::routing::Environment;

/// Resolve `auto` to a concrete format.
pub fn effective_format(format: LogFormat, environment: Environment) -> LogFormat {
    match (format, environment) {
        (LogFormat::Auto, Environment::Production) => LogFormat::Json,
        (LogFormat::Auto, Environment::Development) => LogFormat::Pretty,
        (explicit, _) => explicit,
    }
}

fn default_directives(level: &str) -> String {
    format!("tenant_router={level},tower_http={level}")
}

/// Install the global tracing subscriber.
pub fn init_logging(
    config: &ObservabilityConfig,
    environment: Environment,
) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.log_level)));

    let registry = tracing_subscriber::registry().with(filter);
    match effective_format(config.log_format, environment) {
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
        _ => registry.with(fmt::layer()).try_init(),
    }
}
