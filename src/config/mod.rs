//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → compiled into the routing pipeline at startup
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup and never reloaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, read_config, ConfigError};
pub use schema::{
    DownstreamConfig, ExclusionConfig, ListenerConfig, LogFormat, ObservabilityConfig,
    RouterConfig, SessionConfig, TenancyConfig, TimeoutConfig, TlsConfig,
};
pub use validation::{validate_config, ValidationError};
