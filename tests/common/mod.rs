//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tenant_router::config::RouterConfig;
use tenant_router::http::HttpServer;
use tenant_router::lifecycle::Shutdown;
use tenant_router::routing::Environment;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

/// A downstream server that answers every request with a JSON echo of the
/// request target, `Host` and `x-original-uri` it received.
pub struct EchoDownstream {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

impl EchoDownstream {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

pub async fn start_echo_downstream() -> EchoDownstream {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let counter = counter.clone();
                    tokio::spawn(async move {
                        let mut reader = BufReader::new(socket);

                        let mut request_line = String::new();
                        if reader.read_line(&mut request_line).await.unwrap_or(0) == 0 {
                            return;
                        }
                        counter.fetch_add(1, Ordering::SeqCst);

                        let mut host = String::new();
                        let mut original_uri = String::new();
                        let mut content_length = 0usize;
                        loop {
                            let mut line = String::new();
                            let n = reader.read_line(&mut line).await.unwrap_or(0);
                            if n == 0 || line == "\r\n" {
                                break;
                            }
                            if let Some((name, value)) = line.split_once(':') {
                                match name.trim().to_ascii_lowercase().as_str() {
                                    "host" => host = value.trim().to_string(),
                                    "x-original-uri" => original_uri = value.trim().to_string(),
                                    "content-length" => {
                                        content_length = value.trim().parse().unwrap_or(0)
                                    }
                                    _ => {}
                                }
                            }
                        }

                        // Drain the body so closing the socket does not reset it.
                        let mut body = vec![0u8; content_length];
                        let _ = reader.read_exact(&mut body).await;

                        let target = request_line.split_whitespace().nth(1).unwrap_or("");
                        let body = serde_json::json!({
                            "target": target,
                            "host": host,
                            "original_uri": original_uri,
                        })
                        .to_string();

                        let response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        );
                        let mut socket = reader.into_inner();
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    EchoDownstream { addr, hits }
}

/// Router config for `example.com` pointing at `downstream`.
pub fn config(environment: Environment, downstream: SocketAddr) -> RouterConfig {
    let mut config = RouterConfig::default();
    config.tenancy.environment = environment;
    config.tenancy.base_domain = "example.com".into();
    config.downstream.address = downstream.to_string();
    config.observability.metrics_enabled = false;
    config
}

/// Start the router on an ephemeral port.
pub async fn start_router(config: RouterConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}

/// Client that never follows redirects.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
