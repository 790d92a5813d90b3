//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject unusable tenancy settings before any request is classified
//! - Validate addresses and value ranges (timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::RouterConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("tenancy.base_domain must not be empty")]
    EmptyBaseDomain,

    #[error("tenancy.base_domain must be a bare domain name, got {0:?}")]
    MalformedBaseDomain(String),

    #[error("tenancy.local_root must not be empty")]
    EmptyLocalRoot,

    #[error("tenancy.fallback_host must not be empty")]
    EmptyFallbackHost,

    #[error("session.cookie_names must list at least one cookie")]
    NoSessionCookies,

    #[error("session.cookie_names contains an empty name")]
    EmptySessionCookie,

    #[error("exclusion prefix {0:?} must start with '/'")]
    RelativeExclusionPrefix(String),

    #[error("{field} is not a valid socket address: {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

fn check_address(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let tenancy = &config.tenancy;

    let base_domain = tenancy.base_domain.trim();
    if base_domain.is_empty() {
        errors.push(ValidationError::EmptyBaseDomain);
    } else if base_domain.contains(|c: char| c == '/' || c == ':' || c.is_whitespace())
        || base_domain.starts_with('.')
        || base_domain.ends_with('.')
    {
        errors.push(ValidationError::MalformedBaseDomain(tenancy.base_domain.clone()));
    }

    if tenancy.local_root.trim().is_empty() {
        errors.push(ValidationError::EmptyLocalRoot);
    }

    if let Some(fallback) = &tenancy.fallback_host {
        if fallback.trim().is_empty() {
            errors.push(ValidationError::EmptyFallbackHost);
        }
    }

    if config.session.cookie_names.is_empty() {
        errors.push(ValidationError::NoSessionCookies);
    } else if config.session.cookie_names.iter().any(|n| n.trim().is_empty()) {
        errors.push(ValidationError::EmptySessionCookie);
    }

    let exclusions = &config.exclusions;
    for prefix in exclusions.api_prefixes.iter().chain(&exclusions.internal_prefixes) {
        if !prefix.starts_with('/') {
            errors.push(ValidationError::RelativeExclusionPrefix(prefix.clone()));
        }
    }

    check_address("listener.bind_address", &config.listener.bind_address, &mut errors);
    check_address("downstream.address", &config.downstream.address, &mut errors);
    if config.observability.metrics_enabled {
        check_address(
            "observability.metrics_address",
            &config.observability.metrics_address,
            &mut errors,
        );
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.connect_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
