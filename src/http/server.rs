//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all routing handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener (plain TCP or TLS)
//! - Dispatch requests through the tenant routing pipeline
//! - Forward rewritten and bypassed requests to the downstream server
//! - Observability (metrics, correlation IDs)

use axum::{
    body::Body,
    extract::State,
    http::{header, uri::Scheme, HeaderValue, Request, StatusCode, Uri, Version},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use axum_server::tls_rustls::RustlsConfig;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::RouterConfig;
use crate::http::request::{MakeRequestUuid, RequestInspector, X_REQUEST_ID};
use crate::http::rewrite::{apply, Outcome, X_ORIGINAL_URI};
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::routing::{Dispatch, Router as TenantRouter};

/// How long in-flight TLS connections may drain after shutdown.
const TLS_DRAIN_SECS: u64 = 30;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<TenantRouter>,
    pub inspector: Arc<RequestInspector>,
    pub client: Client<HttpConnector, Body>,
    pub downstream: Arc<str>,
}

/// HTTP server for the tenant router.
pub struct HttpServer {
    router: Router,
    config: RouterConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RouterConfig) -> Self {
        let tenant_router = Arc::new(TenantRouter::from_config(&config));
        let inspector = Arc::new(RequestInspector::from_config(&config));

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(config.timeouts.connect_secs)));
        let client = Client::builder(TokioExecutor::new()).build(connector);

        let state = AppState {
            router: tenant_router,
            inspector,
            client,
            downstream: Arc::from(config.downstream.address.as_str()),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &RouterConfig, state: AppState) -> Router {
        Router::new()
            .route("/", any(route_handler))
            .route("/{*path}", any(route_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
    }

    /// The assembled Axum router, for embedding or in-process tests.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on a plain TCP listener until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            environment = %self.config.tenancy.environment,
            base_domain = %self.config.tenancy.base_domain,
            downstream = %self.config.downstream.address,
            "HTTP server starting"
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Run the server with TLS termination until `shutdown` fires.
    pub async fn run_tls(
        self,
        addr: SocketAddr,
        tls: RustlsConfig,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        tracing::info!(address = %addr, "HTTPS server starting");

        let handle = axum_server::Handle::new();
        let drain = handle.clone();
        tokio::spawn(async move {
            shutdown::wait(shutdown).await;
            drain.graceful_shutdown(Some(Duration::from_secs(TLS_DRAIN_SECS)));
        });

        axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }
}

/// Main routing handler.
/// Classifies the request, then rewrites and forwards it or redirects.
async fn route_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let incoming = state.inspector.inspect(&request);

    match state.router.dispatch(&incoming) {
        Dispatch::Bypass { exclusion } => {
            let mut request = request;
            // Only rewritten requests carry a router-issued original URI.
            request.headers_mut().remove(X_ORIGINAL_URI);
            tracing::debug!(
                request_id = %request_id,
                path = %incoming.path,
                exclusion = exclusion.as_str(),
                "Excluded path, forwarding unchanged"
            );
            let response = forward(&state, request, &incoming.host, &request_id).await;
            metrics::record_request("none", "bypass", start_time);
            response
        }
        Dispatch::Route { tenant, decision } => {
            tracing::debug!(
                request_id = %request_id,
                host = %incoming.host,
                path = %incoming.path,
                tenant = %tenant,
                action = decision.action(),
                target = decision.target(),
                "Routed request"
            );
            match apply(&decision, request) {
                Outcome::Rewrite(request) => {
                    let response = forward(&state, request, &incoming.host, &request_id).await;
                    metrics::record_request(tenant.kind(), decision.action(), start_time);
                    response
                }
                Outcome::Redirect(response) => {
                    metrics::record_request(tenant.kind(), decision.action(), start_time);
                    response
                }
            }
        }
    }
}

/// Send the request to the downstream server, streaming both bodies.
/// `host` is what the client addressed; it is kept as the `Host` header.
async fn forward(
    state: &AppState,
    request: Request<Body>,
    host: &str,
    request_id: &str,
) -> Response {
    let (mut parts, body) = request.into_parts();

    if !parts.headers.contains_key(header::HOST) {
        if let Ok(value) = HeaderValue::from_str(host) {
            parts.headers.insert(header::HOST, value);
        }
    }

    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let uri = match Uri::builder()
        .scheme(Scheme::HTTP)
        .authority(&*state.downstream)
        .path_and_query(path_and_query)
        .build()
    {
        Ok(uri) => uri,
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Invalid downstream URI");
            return (StatusCode::BAD_GATEWAY, "Invalid downstream address").into_response();
        }
    };
    parts.uri = uri;
    // Downstream connections are plain HTTP/1.1 regardless of the client protocol.
    parts.version = Version::HTTP_11;

    match state.client.request(Request::from_parts(parts, body)).await {
        Ok(response) => {
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Downstream error");
            (StatusCode::BAD_GATEWAY, "Downstream request failed").into_response()
        }
    }
}
