//! HTTP echo service.
//!
//! Answers every request with a JSON rendition of itself: protocol, headers,
//! cookies, query, form, parsed body and decoded authorization.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server ──▶ http::echo ──▶ mapping ──▶ parser::dispatch
//!                                                                       │
//!                                                                       ▼
//!     Client Response                                            parser::registry
//!     ◀────────────── JSON body + X-Error ◀─── Dict + ParseErrors ◀──────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use http_echo::config::{load_config, EchoConfig};
use http_echo::http::EchoServer;
use http_echo::lifecycle::{signals, Shutdown};
use http_echo::observability;
use http_echo::parser::registry_from_config;

#[derive(Parser)]
#[command(name = "http-echo")]
#[command(about = "Echo HTTP requests back as JSON", long_about = None)]
#[command(disable_version_flag = true)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides the configured bind address port)
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Print version and exit
    #[arg(short = 'v', long = "version")]
    version: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.version {
        eprintln!(
            "http-echo/{} {}/{}",
            env!("CARGO_PKG_VERSION"),
            std::env::consts::OS,
            std::env::consts::ARCH
        );
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EchoConfig::default(),
    };

    observability::init_logging(&config.observability.log_filter);
    tracing::info!("http-echo v{} starting", env!("CARGO_PKG_VERSION"));

    let mut bind_address: SocketAddr = config.listener.bind_address.parse()?;
    if let Some(port) = cli.port {
        bind_address.set_port(port);
    }
    config.listener.bind_address = bind_address.to_string();

    tracing::info!(
        bind_address = %config.listener.bind_address,
        inspect_body = config.echo.inspect_body,
        body_limit_bytes = config.echo.body_limit_bytes,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => observability::metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let registry = Arc::new(registry_from_config(&config.parsers)?);

    let listener = TcpListener::bind(bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = EchoServer::new(config, registry);
    let server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    server_task.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
