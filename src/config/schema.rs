//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so a minimal (or absent) config is usable.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Directory override for the daemon socket, e.g. `DMX_SOCKET_DIR=/run/dmx`.
pub const SOCKET_DIR_ENV: &str = "DMX_SOCKET_DIR";

/// Socket file name appended to the directory override.
pub const SOCKET_FILE_NAME: &str = "dmx.sock";

/// Fallback socket path when neither config nor environment say otherwise.
pub const DEFAULT_SOCKET_PATH: &str = "/tmp/dmx.sock";

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Control daemon socket settings.
    pub daemon: DaemonConfig,

    /// Per-route admission gate capacities.
    pub admission: AdmissionConfig,

    /// Dial retry policy for the daemon socket.
    pub retry: RetryConfig,

    /// Status route behavior.
    pub status: StatusConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8084").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8084".to_string(),
        }
    }
}

/// Control daemon socket settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DaemonConfig {
    /// Full socket path. When unset, the path is derived from the
    /// `DMX_SOCKET_DIR` environment variable, falling back to
    /// `/tmp/dmx.sock`.
    pub socket_path: Option<PathBuf>,
}

impl DaemonConfig {
    /// Resolve the daemon socket path: explicit config wins, then the
    /// environment directory, then the default.
    pub fn resolve_socket_path(&self) -> PathBuf {
        if let Some(path) = &self.socket_path {
            return path.clone();
        }
        match std::env::var(SOCKET_DIR_ENV) {
            Ok(dir) if !dir.is_empty() => PathBuf::from(dir).join(SOCKET_FILE_NAME),
            _ => PathBuf::from(DEFAULT_SOCKET_PATH),
        }
    }
}

/// Per-route admission gate capacities.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdmissionConfig {
    /// Slots for the set-values routes. Capacity 1 serializes all writes
    /// against the control daemon; this is deliberate, not an accident.
    pub set_slots: usize,

    /// Slots for the status route.
    pub status_slots: usize,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            set_slots: 1,
            status_slots: 5,
        }
    }
}

/// Dial retry policy for transient daemon socket failures.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total dial attempts, including the first (minimum 1).
    pub max_attempts: u32,

    /// Base backoff delay in milliseconds.
    pub base_delay_ms: u64,

    /// Backoff delay cap in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay_ms: 25,
            max_delay_ms: 250,
        }
    }
}

/// Status route behavior.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StatusConfig {
    /// Fixed artificial delay before the status route responds, in
    /// milliseconds. Exists to exercise the status gate under load.
    pub delay_ms: u64,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self { delay_ms: 100 }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus metrics exporter.
    pub metrics_enabled: bool,

    /// Metrics exporter bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9091".to_string(),
        }
    }
}
