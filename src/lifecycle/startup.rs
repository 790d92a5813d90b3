//! Startup orchestration.
//!
//! # Responsibilities
//! - Load configuration and apply command-line overrides
//! - Validate before anything else is initialized
//! - Start metrics, signal handling, then the listener
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - Listener starts last (traffic only when ready)

use std::net::SocketAddr;
use std::path::Path;

use tokio::net::TcpListener;

use crate::config::{read_config, validate_config, ConfigError, RouterConfig};
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::net::tls::load_tls_config;
use crate::observability::metrics;
use crate::routing::Environment;

/// Values supplied on the command line that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub environment: Option<Environment>,
    pub base_domain: Option<String>,
    pub bind_address: Option<String>,
}

impl Overrides {
    fn apply(&self, config: &mut RouterConfig) {
        if let Some(environment) = self.environment {
            config.tenancy.environment = environment;
        }
        if let Some(base_domain) = &self.base_domain {
            config.tenancy.base_domain = base_domain.clone();
        }
        if let Some(bind_address) = &self.bind_address {
            config.listener.bind_address = bind_address.clone();
        }
    }
}

/// Read the config file (or defaults), apply overrides, validate.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: &Overrides,
) -> Result<RouterConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => RouterConfig::default(),
    };
    overrides.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Start every subsystem and serve until a shutdown signal arrives.
pub async fn run(config: RouterConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    let tls = config.listener.tls.clone();
    let bind_address = config.listener.bind_address.clone();
    let server = HttpServer::new(config);

    match tls {
        Some(tls) => {
            let rustls = load_tls_config(&tls).await?;
            let addr: SocketAddr = bind_address.parse()?;
            server.run_tls(addr, rustls, shutdown.subscribe()).await?;
        }
        None => {
            let listener = TcpListener::bind(&bind_address).await?;
            server.run(listener, shutdown.subscribe()).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationError;

    #[test]
    fn defaults_without_domain_are_rejected() {
        let err = resolve_config(None, &Overrides::default()).unwrap_err();
        match err {
            ConfigError::Validation(errors) => {
                assert!(errors.contains(&ValidationError::EmptyBaseDomain));
            }
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn overrides_take_precedence() {
        let overrides = Overrides {
            environment: Some(Environment::Production),
            base_domain: Some("example.com".into()),
            bind_address: Some("127.0.0.1:9000".into()),
        };
        let config = resolve_config(None, &overrides).unwrap();
        assert_eq!(config.tenancy.environment, Environment::Production);
        assert_eq!(config.tenancy.base_domain, "example.com");
        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
    }

    #[test]
    fn overrides_are_validated() {
        let overrides = Overrides {
            base_domain: Some("https://example.com".into()),
            ..Overrides::default()
        };
        assert!(matches!(
            resolve_config(None, &overrides),
            Err(ConfigError::Validation(_))
        ));
    }
}
