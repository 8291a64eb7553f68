//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, request ID, CORS header)
//! - Construct per-route admission gates and the daemon client
//! - Serve with graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue},
    routing::{any, get},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::admission::AdmissionGate;
use crate::config::RelayConfig;
use crate::downstream::DaemonClient;
use crate::http::handlers;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub daemon: Arc<DaemonClient>,
    pub set_gate: Arc<AdmissionGate>,
    pub status_gate: Arc<AdmissionGate>,
    pub status_delay: Duration,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Self {
        let daemon = Arc::new(DaemonClient::new(
            config.daemon.resolve_socket_path(),
            config.retry.clone(),
        ));

        let state = AppState {
            daemon,
            set_gate: Arc::new(AdmissionGate::new(config.admission.set_slots)),
            status_gate: Arc::new(AdmissionGate::new(config.admission.status_slots)),
            status_delay: Duration::from_millis(config.status.delay_ms),
        };

        let router = Self::build_router(state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        // Browser callers read the response body cross-origin
        let cors_header = SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        );

        Router::new()
            .route("/", any(handlers::set_channel_values))
            .route("/set", get(handlers::set_channel_query))
            .route("/status", get(handlers::status))
            .with_state(state)
            .layer(cors_header)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server until Ctrl+C or an explicit shutdown signal.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            daemon_socket = %self.config.daemon.resolve_socket_path().display(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown.recv() => {}
                    result = tokio::signal::ctrl_c() => {
                        if let Err(e) = result {
                            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                        }
                    }
                }
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}
