//! Decision pipeline.
//!
//! # Responsibilities
//! - Filter excluded paths before anything else
//! - Classify the host, then resolve the route
//! - Return either an explicit bypass or a tenant decision
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Built once from configuration, shared via `Arc`
//! - A bypass carries no decision: the resolver never sees excluded paths

use serde::Serialize;

use crate::config::RouterConfig;
use crate::routing::classifier::HostClassifier;
use crate::routing::matcher::{Exclusion, ExclusionMatcher};
use crate::routing::resolver::resolve;
use crate::routing::tenant::{IncomingRequest, RouteDecision, TenantKey};

/// Result of running a request through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "dispatch", rename_all = "lowercase")]
pub enum Dispatch {
    /// Path is excluded; forward as-is.
    Bypass { exclusion: Exclusion },
    /// Tenant routing applies.
    Route {
        tenant: TenantKey,
        decision: RouteDecision,
    },
}

/// Classifies and resolves incoming requests.
#[derive(Debug)]
pub struct Router {
    classifier: HostClassifier,
    exclusions: ExclusionMatcher,
}

impl Router {
    pub fn new(classifier: HostClassifier, exclusions: ExclusionMatcher) -> Self {
        Self {
            classifier,
            exclusions,
        }
    }

    /// Compile the router from configuration.
    pub fn from_config(config: &RouterConfig) -> Self {
        Self::new(
            HostClassifier::from_config(&config.tenancy),
            ExclusionMatcher::from_config(&config.exclusions),
        )
    }

    /// Run the full pipeline for one request.
    pub fn dispatch(&self, request: &IncomingRequest) -> Dispatch {
        if let Some(exclusion) = self.exclusions.check(&request.path) {
            return Dispatch::Bypass { exclusion };
        }

        let tenant = self.classifier.classify(&request.host);
        let decision = resolve(&tenant, &request.path, request.has_session_cookie);
        Dispatch::Route { tenant, decision }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::tenant::Environment;

    fn router() -> Router {
        Router::new(
            HostClassifier::new(Environment::Production, "example.com", "localhost:3000"),
            ExclusionMatcher::default(),
        )
    }

    fn request(host: &str, path: &str, session: bool) -> IncomingRequest {
        IncomingRequest {
            host: host.to_string(),
            path: path.to_string(),
            has_session_cookie: session,
        }
    }

    #[test]
    fn customer_site_is_rewritten() {
        let d = router().dispatch(&request("acme.example.com", "/drafts", false));
        assert_eq!(
            d,
            Dispatch::Route {
                tenant: TenantKey::Custom("acme".into()),
                decision: RouteDecision::Rewrite("/_sites/acme/drafts".into()),
            }
        );
    }

    #[test]
    fn signed_in_app_login_redirects() {
        let d = router().dispatch(&request("app.example.com", "/login", true));
        assert_eq!(
            d,
            Dispatch::Route {
                tenant: TenantKey::App,
                decision: RouteDecision::Redirect("/".into()),
            }
        );
    }

    #[test]
    fn excluded_paths_short_circuit_for_every_tenant() {
        let r = router();
        for host in ["app.example.com", "example.com", "acme.example.com"] {
            for (path, exclusion) in [
                ("/api/post", Exclusion::Api),
                ("/_next/data/x.json", Exclusion::Internal),
                ("/favicon.ico", Exclusion::StaticFile),
            ] {
                // Even the app login rule must not fire on an excluded path.
                assert_eq!(
                    r.dispatch(&request(host, path, true)),
                    Dispatch::Bypass { exclusion }
                );
            }
        }
    }

    #[test]
    fn dispatch_serializes_for_cli_output() {
        let d = router().dispatch(&request("example.com", "/about", false));
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["dispatch"], "route");
        assert_eq!(json["tenant"]["kind"], "root");
        assert_eq!(json["decision"]["target"], "/home/about");
    }
}
