//! Per-request routing values.
//!
//! All of these are built fresh for every request and dropped once the
//! request has been rewritten or redirected. None of them are shared.

use serde::{Deserialize, Serialize};

/// Deployment environment. Selects which hostname suffix is stripped
/// during classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development (`{label}.localhost:{port}`).
    #[default]
    Development,
    /// Production (`{label}.{base_domain}`).
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("unknown environment: {other}")),
        }
    }
}

/// Tenant category derived from the `Host` header.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "label", rename_all = "lowercase")]
pub enum TenantKey {
    /// Operator control plane (`app.` subdomain).
    App,
    /// Bare base domain or local root: the marketing site.
    Root,
    /// Any other host, keyed by its stripped label.
    Custom(String),
}

impl TenantKey {
    /// Short label used in logs and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            TenantKey::App => "app",
            TenantKey::Root => "root",
            TenantKey::Custom(_) => "custom",
        }
    }
}

impl std::fmt::Display for TenantKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TenantKey::Custom(label) => write!(f, "custom({})", label),
            other => write!(f, "{}", other.kind()),
        }
    }
}

/// Routing view of one request. Built per request, never shared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomingRequest {
    /// Host the request was addressed to. Never empty.
    pub host: String,
    /// Request path. Always starts with `/`.
    pub path: String,
    /// Whether any configured session cookie was sent.
    pub has_session_cookie: bool,
}

/// What to do with a request once its tenant is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "target", rename_all = "lowercase")]
pub enum RouteDecision {
    /// Serve `target` downstream; the client-visible URL does not change.
    Rewrite(String),
    /// Send the client to `target` with a 3xx response.
    Redirect(String),
}

impl RouteDecision {
    /// The path this decision points at.
    pub fn target(&self) -> &str {
        match self {
            RouteDecision::Rewrite(target) | RouteDecision::Redirect(target) => target,
        }
    }

    /// `"rewrite"` or `"redirect"`.
    pub fn action(&self) -> &'static str {
        match self {
            RouteDecision::Rewrite(_) => "rewrite",
            RouteDecision::Redirect(_) => "redirect",
        }
    }
}
