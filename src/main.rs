//! Multi-tenant edge router (v1)
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────────┐
//!                         │                  TENANT ROUTER                   │
//!                         │                                                  │
//!   Client Request        │  ┌─────────┐   ┌───────────┐   ┌────────────┐   │
//!   ──────────────────────┼─▶│  http   │──▶│ exclusions│──▶│ classifier │   │
//!                         │  │ server  │   │  (bypass) │   │host→tenant │   │
//!                         │  └─────────┘   └─────┬─────┘   └─────┬──────┘   │
//!                         │                      │               ▼          │
//!                         │                      │         ┌────────────┐   │
//!                         │                      │         │  resolver  │   │
//!                         │                      │         └─────┬──────┘   │
//!                         │                      │               ▼          │
//!   307 Redirect          │                      │         ┌────────────┐   │
//!   ◀─────────────────────┼──────────────────────┼─────────│  rewrite   │   │
//!                         │                      ▼         └─────┬──────┘   │
//!                         │                ┌───────────┐         │          │
//!   Client Response       │                │  forward  │◀────────┘          │    Downstream
//!   ◀─────────────────────┼────────────────│ (hyper)   │────────────────────┼──▶ page server
//!                         │                └───────────┘                    │
//!                         └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use tenant_router::lifecycle::startup::{self, Overrides};
use tenant_router::observability::logging;
use tenant_router::routing::Environment;

#[derive(Parser)]
#[command(name = "tenant-router")]
#[command(about = "Host-based tenant router for multi-tenant sites", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `tenancy.environment` (development or production).
    #[arg(short, long)]
    environment: Option<Environment>,

    /// Override `tenancy.base_domain`.
    #[arg(long)]
    base_domain: Option<String>,

    /// Override `listener.bind_address`.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let overrides = Overrides {
        environment: cli.environment,
        base_domain: cli.base_domain,
        bind_address: cli.bind,
    };

    // Invalid configuration is fatal before the first request is accepted.
    let config = startup::resolve_config(cli.config.as_deref(), &overrides)?;

    logging::init_logging(&config.observability, config.tenancy.environment)?;

    tracing::info!("tenant-router v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        environment = %config.tenancy.environment,
        base_domain = %config.tenancy.base_domain,
        bind_address = %config.listener.bind_address,
        downstream = %config.downstream.address,
        tls = config.listener.tls.is_some(),
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
