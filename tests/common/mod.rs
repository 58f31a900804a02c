//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use http_echo::config::EchoConfig;
use http_echo::http::EchoServer;
use http_echo::lifecycle::Shutdown;
use http_echo::parser::{register_defaults, ParserRegistry};
use tokio::net::TcpListener;

/// Registry with the built-in parsers.
pub fn default_registry() -> Arc<ParserRegistry> {
    let registry = ParserRegistry::new();
    register_defaults(&registry).unwrap();
    Arc::new(registry)
}

/// Start an echo server on an ephemeral port.
///
/// Keep the returned `Shutdown` alive for as long as the server is needed.
#[allow(dead_code)]
pub async fn start_echo_server(
    config: EchoConfig,
    registry: Arc<ParserRegistry>,
) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = EchoServer::new(config, registry);
    let rx = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}

/// HTTP client that never reuses connections or goes through a proxy.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
