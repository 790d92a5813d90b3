//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, host / path / session cookie extraction)
//!     → [routing pipeline decides: bypass, rewrite or redirect]
//!     → rewrite.rs (apply the decision to the request)
//!     → server.rs (forward downstream, or answer with the redirect)
//! ```

pub mod request;
pub mod rewrite;
pub mod server;

pub use request::{MakeRequestUuid, RequestInspector, X_REQUEST_ID};
pub use rewrite::{apply, Outcome, X_ORIGINAL_URI};
pub use server::HttpServer;
