//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::Environment;

/// Root configuration for the tenant router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Listener configuration (bind address, TLS).
    pub listener: ListenerConfig,

    /// Environment and domain used for host classification.
    pub tenancy: TenancyConfig,

    /// Session cookie detection.
    pub session: SessionConfig,

    /// Paths that bypass tenant routing.
    pub exclusions: ExclusionConfig,

    /// Server that receives rewritten and bypassed requests.
    pub downstream: DownstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Optional TLS configuration.
    pub tls: Option<TlsConfig>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            tls: None,
        }
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: String,

    /// Path to private key file (PEM).
    pub key_path: String,
}

/// Host classification settings. Fixed for the life of the process.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TenancyConfig {
    /// Which hostname suffix is stripped.
    pub environment: Environment,

    /// Production root domain (e.g., "example.com"). Required.
    pub base_domain: String,

    /// Local development root including port.
    pub local_root: String,

    /// Host assumed when a request carries no usable `Host` header.
    /// Defaults to `demo.{base_domain}`.
    pub fallback_host: Option<String>,
}

impl TenancyConfig {
    /// The host used for requests without a `Host` header.
    pub fn fallback_host(&self) -> String {
        match &self.fallback_host {
            Some(host) => host.clone(),
            None => format!("demo.{}", self.base_domain),
        }
    }
}

impl Default for TenancyConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            base_domain: String::new(),
            local_root: "localhost:3000".to_string(),
            fallback_host: None,
        }
    }
}

/// Session cookie detection.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Any of these cookies being present marks the request as signed in.
    pub cookie_names: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_names: vec![
                "next-auth.session-token".to_string(),
                "__Secure-next-auth.session-token".to_string(),
            ],
        }
    }
}

/// Paths forwarded without tenant routing.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExclusionConfig {
    /// API route prefixes.
    pub api_prefixes: Vec<String>,

    /// Framework-internal and public asset folders.
    pub internal_prefixes: Vec<String>,

    /// Exclude bare files at the web root (`/favicon.ico`).
    pub root_files: bool,
}

impl Default for ExclusionConfig {
    fn default() -> Self {
        Self {
            api_prefixes: vec!["/api/".to_string()],
            internal_prefixes: vec![
                "/_next/".to_string(),
                "/_static/".to_string(),
                "/examples/".to_string(),
            ],
            root_files: true,
        }
    }
}

/// Downstream page/API server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DownstreamConfig {
    /// Downstream address (e.g., "127.0.0.1:3000").
    pub address: String,
}

impl Default for DownstreamConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Downstream connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON in production, pretty in development.
    #[default]
    Auto,
    Json,
    Pretty,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Auto,
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
