//! API forwarder.
//!
//! ```text
//!     Client ──▶ /api/<path>?<query> ──▶ forwarder ──▶ <base_url>/<path>?<query> ──▶ Backend
//!     Client ◀── status, content-type, set-cookie*, body (or envelope) ◀──────────────┘
//! ```

use std::path::PathBuf;

use api_forwarder::config::{load_config, Overrides};
use api_forwarder::observability::logging;
use api_forwarder::{HttpServer, Shutdown};
use clap::Parser;
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(name = "api-forwarder")]
#[command(about = "Forwards /api requests to a backend origin", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let overrides = Overrides {
        bind_address: cli.bind,
        ..Overrides::from_env()
    };
    let config = match load_config(cli.config.as_deref(), overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("api-forwarder: {e}");
            std::process::exit(1);
        }
    };

    logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        base_url = %config.upstream.base_url,
        timeout_secs = ?config.upstream.timeout_secs,
        max_body_size = config.limits.max_body_size,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
