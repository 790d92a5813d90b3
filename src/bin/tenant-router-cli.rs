use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;

use tenant_router::config::{load_config, ConfigError};
use tenant_router::lifecycle::startup::{resolve_config, Overrides};
use tenant_router::routing::{Environment, IncomingRequest, Router};

#[derive(Parser)]
#[command(name = "tenant-router-cli")]
#[command(about = "Offline tools for the tenant router", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how a request would be routed
    Explain {
        /// Host header value; omit to use the fallback host
        #[arg(long)]
        host: Option<String>,

        /// Request path
        #[arg(long, default_value = "/")]
        path: String,

        /// Pretend a session cookie is present
        #[arg(long)]
        session: bool,

        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(short, long)]
        environment: Option<Environment>,

        #[arg(long)]
        base_domain: Option<String>,
    },
    /// Validate a configuration file
    Check {
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Explain {
            host,
            path,
            session,
            config,
            environment,
            base_domain,
        } => {
            let overrides = Overrides {
                environment,
                base_domain,
                bind_address: None,
            };
            let config = resolve_config(config.as_deref(), &overrides)?;
            let router = Router::from_config(&config);

            let request = IncomingRequest {
                host: host
                    .filter(|h| !h.trim().is_empty())
                    .unwrap_or_else(|| config.tenancy.fallback_host()),
                path: if path.starts_with('/') { path } else { format!("/{}", path) },
                has_session_cookie: session,
            };
            let dispatch = router.dispatch(&request);

            let output = json!({
                "environment": config.tenancy.environment,
                "request": request,
                "result": dispatch,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Check { config } => match load_config(&config) {
            Ok(_) => println!("{}: ok", config.display()),
            Err(ConfigError::Validation(errors)) => {
                eprintln!("{}: {} problem(s)", config.display(), errors.len());
                for error in errors {
                    eprintln!("  - {}", error);
                }
                std::process::exit(1);
            }
            Err(e) => {
                eprintln!("{}: {}", config.display(), e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
