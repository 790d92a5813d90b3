//! Applying route decisions to requests.
//!
//! # Responsibilities
//! - Rewrite: swap the request path, keep the query string and all headers
//! - Redirect: build the 307 response and stop handling the request
//!
//! # Design Decisions
//! - No business logic here; the decision is applied as given
//! - Total: a target that is not a legal URI path is percent-encoded
//!   rather than rejected
//! - The client-visible URI travels downstream in `x-original-uri`

use axum::body::Body;
use axum::http::uri::PathAndQuery;
use axum::http::{header, HeaderValue, Request, Response, StatusCode, Uri};

use crate::routing::RouteDecision;

/// Request header carrying the URI the client actually asked for.
pub const X_ORIGINAL_URI: &str = "x-original-uri";

/// Terminal action for a routed request.
#[derive(Debug)]
pub enum Outcome<B> {
    /// Continue handling this request (its path has been rewritten).
    Rewrite(Request<B>),
    /// Answer the client directly.
    Redirect(Response<Body>),
}

/// Apply a routing decision to a request.
pub fn apply<B>(decision: &RouteDecision, mut request: Request<B>) -> Outcome<B> {
    match decision {
        RouteDecision::Rewrite(target) => {
            let original = request.uri().clone();
            let path_and_query = with_query(target, original.query());

            request.headers_mut().remove(X_ORIGINAL_URI);
            if let Some(pq) = original.path_and_query() {
                if let Ok(value) = HeaderValue::from_str(pq.as_str()) {
                    request.headers_mut().insert(X_ORIGINAL_URI, value);
                }
            }

            let mut parts = original.into_parts();
            parts.path_and_query = Some(path_and_query);
            if let Ok(uri) = Uri::from_parts(parts) {
                *request.uri_mut() = uri;
            }
            Outcome::Rewrite(request)
        }
        RouteDecision::Redirect(target) => {
            let location = with_query(target, request.uri().query());
            Outcome::Redirect(redirect_response(location.as_str()))
        }
    }
}

/// Build a `307 Temporary Redirect` to `location`.
pub fn redirect_response(location: &str) -> Response<Body> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::TEMPORARY_REDIRECT;
    let value = HeaderValue::from_str(location)
        .unwrap_or_else(|_| HeaderValue::from_static("/"));
    response.headers_mut().insert(header::LOCATION, value);
    response
}

fn with_query(path: &str, query: Option<&str>) -> PathAndQuery {
    let raw = match query {
        Some(q) => format!("{}?{}", path, q),
        None => path.to_string(),
    };
    PathAndQuery::try_from(raw.as_str())
        .or_else(|_| PathAndQuery::try_from(escape(&raw)))
        .unwrap_or_else(|_| PathAndQuery::from_static("/"))
}

/// Percent-encode every byte outside the unreserved and sub-delim sets.
fn escape(raw: &str) -> String {
    const KEEP: &[u8] = b"-._~!$&'()*+,;=:@/?%";
    let mut out = String::with_capacity(raw.len());
    for b in raw.bytes() {
        if b.is_ascii_alphanumeric() || KEEP.contains(&b) {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{:02X}", b));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header("Host", "acme.example.com")
            .header("Cookie", "theme=dark")
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn rewrite_swaps_path_and_keeps_query() {
        let decision = RouteDecision::Rewrite("/_sites/acme/drafts".into());
        match apply(&decision, request("/drafts?page=2&sort=new")) {
            Outcome::Rewrite(req) => {
                assert_eq!(req.uri().path(), "/_sites/acme/drafts");
                assert_eq!(req.uri().query(), Some("page=2&sort=new"));
                assert_eq!(req.headers()["host"], "acme.example.com");
                assert_eq!(req.headers()["cookie"], "theme=dark");
                assert_eq!(req.headers()[X_ORIGINAL_URI], "/drafts?page=2&sort=new");
            }
            Outcome::Redirect(_) => panic!("expected rewrite"),
        }
    }

    #[test]
    fn rewrite_keeps_absolute_uri_authority() {
        let decision = RouteDecision::Rewrite("/home/about".into());
        match apply(&decision, request("http://example.com/about")) {
            Outcome::Rewrite(req) => {
                assert_eq!(req.uri().to_string(), "http://example.com/home/about");
            }
            Outcome::Redirect(_) => panic!("expected rewrite"),
        }
    }

    #[test]
    fn redirect_is_307_with_location() {
        let decision = RouteDecision::Redirect("/".into());
        match apply(&decision, request("/login")) {
            Outcome::Redirect(resp) => {
                assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
                assert_eq!(resp.headers()[header::LOCATION], "/");
            }
            Outcome::Rewrite(_) => panic!("expected redirect"),
        }
    }

    #[test]
    fn redirect_keeps_query() {
        let decision = RouteDecision::Redirect("/".into());
        match apply(&decision, request("/login?next=%2Fsettings")) {
            Outcome::Redirect(resp) => {
                assert_eq!(resp.headers()[header::LOCATION], "/?next=%2Fsettings");
            }
            Outcome::Rewrite(_) => panic!("expected redirect"),
        }
    }

    #[test]
    fn illegal_path_bytes_are_escaped() {
        let pq = with_query("/_sites/a b/é/x", Some("q=1"));
        assert_eq!(pq.as_str(), "/_sites/a%20b/%C3%A9/x?q=1");
    }

    #[test]
    fn client_supplied_original_uri_is_replaced() {
        let mut req = request("/drafts");
        req.headers_mut()
            .insert(X_ORIGINAL_URI, HeaderValue::from_static("/forged"));
        let decision = RouteDecision::Rewrite("/_sites/acme/drafts".into());
        match apply(&decision, req) {
            Outcome::Rewrite(req) => {
                let values: Vec<_> = req.headers().get_all(X_ORIGINAL_URI).iter().collect();
                assert_eq!(values, vec!["/drafts"]);
            }
            Outcome::Redirect(_) => panic!("expected rewrite"),
        }
    }
}
