//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::net::{TcpListener, UnixListener};
use tokio::sync::Mutex;

use dmx_relay::config::RelayConfig;
use dmx_relay::http::HttpServer;
use dmx_relay::lifecycle::Shutdown;

/// A fake control daemon listening on a Unix socket, recording every
/// connection and every command it receives.
#[derive(Clone)]
pub struct MockDaemon {
    connections: Arc<AtomicUsize>,
    received: Arc<Mutex<Vec<String>>>,
}

impl MockDaemon {
    fn new() -> Self {
        Self {
            connections: Arc::new(AtomicUsize::new(0)),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Connections accepted so far.
    #[allow(dead_code)]
    pub fn connection_count(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    /// Commands received so far, one entry per connection.
    pub async fn received(&self) -> Vec<String> {
        self.received.lock().await.clone()
    }

    fn serve(self, listener: UnixListener) {
        tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((mut stream, _)) => {
                        self.connections.fetch_add(1, Ordering::SeqCst);
                        let received = self.received.clone();
                        tokio::spawn(async move {
                            let mut buf = String::new();
                            // relay shuts down its write half, so this
                            // reads one whole command
                            if stream.read_to_string(&mut buf).await.is_ok() {
                                received.lock().await.push(buf);
                            }
                        });
                    }
                    Err(_) => break,
                }
            }
        });
    }
}

/// Start a mock daemon listening immediately.
pub fn start_mock_daemon(path: &Path) -> MockDaemon {
    let daemon = MockDaemon::new();
    let listener = UnixListener::bind(path).expect("bind mock daemon socket");
    daemon.clone().serve(listener);
    daemon
}

/// Start a mock daemon that only binds its socket after `delay`. Dials
/// before the bind fail with a transient error, exercising the retry path.
#[allow(dead_code)]
pub fn start_delayed_daemon(path: &Path, delay: Duration) -> MockDaemon {
    let daemon = MockDaemon::new();
    let path: PathBuf = path.to_path_buf();
    let handle = daemon.clone();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let listener = UnixListener::bind(&path).expect("bind mock daemon socket");
        handle.serve(listener);
    });
    daemon
}

/// Spawn the relay on an ephemeral port; returns its base URL and the
/// shutdown coordinator keeping it alive.
pub async fn spawn_relay(config: RelayConfig) -> (String, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Let the accept loop come up
    tokio::time::sleep(Duration::from_millis(50)).await;
    (format!("http://{}", addr), shutdown)
}

/// Config pointing at the given daemon socket, with fast test-friendly
/// retry timings.
pub fn test_config(socket_path: &Path) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.daemon.socket_path = Some(socket_path.to_path_buf());
    config.retry.max_attempts = 3;
    config.retry.base_delay_ms = 10;
    config.retry.max_delay_ms = 40;
    config.status.delay_ms = 50;
    config
}
