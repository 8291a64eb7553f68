//! DMX Relay
//!
//! Accepts HTTP requests describing target values for numbered DMX output
//! channels, serializes them into the daemon's `channel:value,...` command
//! grammar, and forwards each command over a Unix domain socket.
//!
//! ```text
//! inbound request → admission gate (per route) → forwarder → socket write
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dmx_relay::config::{load_config, RelayConfig};
use dmx_relay::http::HttpServer;
use dmx_relay::lifecycle::Shutdown;
use dmx_relay::observability::metrics;

#[derive(Debug, Parser)]
#[command(name = "dmx-relay", about = "HTTP to DMX control daemon relay")]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dmx_relay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("dmx-relay v0.1.0 starting");

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };
    if let Some(listen) = args.listen {
        config.listener.bind_address = listen;
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        daemon_socket = %config.daemon.resolve_socket_path().display(),
        set_slots = config.admission.set_slots,
        status_slots = config.admission.status_slots,
        "Configuration loaded"
    );

    // A bind failure here is fatal; the relay cannot usefully run without
    // its listener.
    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
