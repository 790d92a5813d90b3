//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! IncomingRequest (host, path, session cookie present?)
//!     → matcher.rs (excluded path? → Bypass, stop here)
//!     → classifier.rs (host → TenantKey)
//!     → resolver.rs (tenant + path + cookie → RouteDecision)
//!     → Return: Dispatch::Route or Dispatch::Bypass
//!
//! Router Compilation (at startup):
//!     RouterConfig
//!     → HostClassifier (suffixes precomputed)
//!     → ExclusionMatcher (prefix lists, root-file rule)
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Router compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching and byte scans only)
//! - Deterministic: same input always yields the same dispatch
//! - First match wins

pub mod classifier;
pub mod matcher;
pub mod resolver;
pub mod router;
pub mod tenant;

pub use classifier::HostClassifier;
pub use matcher::{Exclusion, ExclusionMatcher};
pub use resolver::resolve;
pub use router::{Dispatch, Router};
pub use tenant::{Environment, IncomingRequest, RouteDecision, TenantKey};
