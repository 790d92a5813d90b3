//! Route resolution.
//!
//! # Responsibilities
//! - Map (tenant, path, session cookie presence) to a [`RouteDecision`]
//!
//! # Design Decisions
//! - Ordered rules, first match wins
//! - Total: every tenant/path pair has a decision, nothing can fail
//! - Environment independent; host parsing stays in the classifier
//! - The login redirect is a navigation nicety, not an auth check
//! - A custom label always lands in exactly one path segment under
//!   `/_sites/`, whatever the `Host` header contained

use std::borrow::Cow;

use crate::routing::tenant::{RouteDecision, TenantKey};

/// Namespace for operator control-plane pages.
pub const APP_PREFIX: &str = "/app";

/// Namespace for the marketing site.
pub const ROOT_PREFIX: &str = "/home";

/// Namespace for customer sites; followed by the tenant label.
pub const SITES_PREFIX: &str = "/_sites/";

/// Login page on the app subdomain.
pub const LOGIN_PATH: &str = "/login";

/// Where a signed-in user hitting the login page is sent instead.
pub const SIGNED_IN_HOME: &str = "/";

/// Resolve a request that already passed the exclusion filter.
pub fn resolve(tenant: &TenantKey, path: &str, has_session_cookie: bool) -> RouteDecision {
    match tenant {
        TenantKey::App if path == LOGIN_PATH && has_session_cookie => {
            RouteDecision::Redirect(SIGNED_IN_HOME.to_string())
        }
        TenantKey::App => RouteDecision::Rewrite(format!("{}{}", APP_PREFIX, path)),
        TenantKey::Root => RouteDecision::Rewrite(format!("{}{}", ROOT_PREFIX, path)),
        TenantKey::Custom(label) => {
            RouteDecision::Rewrite(format!("{}{}{}", SITES_PREFIX, site_segment(label), path))
        }
    }
}

/// Percent-encode a tenant label as a single path segment.
fn site_segment(label: &str) -> Cow<'_, str> {
    // Dot segments are unreserved but still walk the path.
    if label == "." || label == ".." {
        return Cow::Owned(label.replace('.', "%2E"));
    }
    urlencoding::encode(label)
}
