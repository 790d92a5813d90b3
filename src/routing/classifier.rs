//! Host classification.
//!
//! # Responsibilities
//! - Normalize the `Host` header (trim, ASCII lowercase)
//! - Strip the environment's hostname suffix to get the tenant label
//! - Map the label onto `App`, `Root` or `Custom`
//!
//! # Design Decisions
//! - Pure string transform: no lookups, no caching, no shared state
//! - Exactly one trailing suffix is stripped, never an inner occurrence
//! - The root check looks at the whole host for both environments

use crate::config::TenancyConfig;
use crate::routing::tenant::{Environment, TenantKey};

/// Label reserved for the operator control plane.
pub const APP_LABEL: &str = "app";

/// Derives a [`TenantKey`] from a raw host value.
#[derive(Debug, Clone)]
pub struct HostClassifier {
    environment: Environment,
    base_domain: String,
    local_root: String,
    production_suffix: String,
    development_suffix: String,
}

impl HostClassifier {
    /// Create a classifier. Both domains are normalized to lowercase.
    pub fn new(
        environment: Environment,
        base_domain: impl Into<String>,
        local_root: impl Into<String>,
    ) -> Self {
        let base_domain = base_domain.into().trim().to_ascii_lowercase();
        let local_root = local_root.into().trim().to_ascii_lowercase();
        Self {
            environment,
            production_suffix: format!(".{}", base_domain),
            development_suffix: format!(".{}", local_root),
            base_domain,
            local_root,
        }
    }

    /// Build from validated tenancy configuration.
    pub fn from_config(config: &TenancyConfig) -> Self {
        Self::new(config.environment, &config.base_domain, &config.local_root)
    }

    /// Classify a host header value.
    pub fn classify(&self, host: &str) -> TenantKey {
        let host = host.trim().to_ascii_lowercase();

        let suffix = match self.environment {
            Environment::Production => &self.production_suffix,
            Environment::Development => &self.development_suffix,
        };
        let label = host.strip_suffix(suffix.as_str()).unwrap_or(&host);

        if label == APP_LABEL {
            return TenantKey::App;
        }

        if host == self.base_domain || host == self.local_root {
            return TenantKey::Root;
        }

        TenantKey::Custom(label.to_string())
    }
}
