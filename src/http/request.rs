//! Request inspection.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4)
//! - Extract routing-relevant information (host, path)
//! - Detect whether a session cookie is present
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - A missing or unreadable `Host` never fails the request; the URI
//!   authority and then the configured fallback host are used instead
//! - Cookie values are never inspected, only cookie names

use axum::http::{HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::config::RouterConfig;
use crate::routing::IncomingRequest;

/// Header carrying the request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Builds [`IncomingRequest`] values from HTTP requests.
#[derive(Debug, Clone)]
pub struct RequestInspector {
    fallback_host: String,
    session_cookies: Vec<String>,
}

impl RequestInspector {
    pub fn new(fallback_host: impl Into<String>, session_cookies: Vec<String>) -> Self {
        Self {
            fallback_host: fallback_host.into(),
            session_cookies,
        }
    }

    pub fn from_config(config: &RouterConfig) -> Self {
        Self::new(
            config.tenancy.fallback_host(),
            config.session.cookie_names.clone(),
        )
    }

    /// Extract the routing view of a request.
    pub fn inspect<B>(&self, request: &Request<B>) -> IncomingRequest {
        IncomingRequest {
            host: self.host(request),
            path: normalize_path(request.uri().path()),
            has_session_cookie: self.has_session_cookie(request),
        }
    }

    fn host<B>(&self, request: &Request<B>) -> String {
        request
            .headers()
            .get(axum::http::header::HOST)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(str::to_string)
            .or_else(|| request.uri().authority().map(|a| a.as_str().to_string()))
            .unwrap_or_else(|| self.fallback_host.clone())
    }

    fn has_session_cookie<B>(&self, request: &Request<B>) -> bool {
        request
            .headers()
            .get_all(axum::http::header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.split('=').next())
            .map(str::trim)
            .any(|name| self.session_cookies.iter().any(|c| c == name))
    }
}

fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}
