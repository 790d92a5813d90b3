//! Multi-tenant edge router.
//!
//! Classifies every request by host into the operator app, the root
//! marketing site or a customer site, rewrites its path into that tenant's
//! namespace and forwards it to the downstream page server.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;

pub use config::RouterConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{
    Dispatch, Environment, HostClassifier, IncomingRequest, RouteDecision, Router, TenantKey,
};
