//! DMX Relay Library
//!
//! Bridges browser-facing HTTP requests to the DMX control daemon's Unix
//! domain socket.

pub mod admission;
pub mod command;
pub mod config;
pub mod downstream;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use admission::AdmissionGate;
pub use command::ChannelCommand;
pub use config::RelayConfig;
pub use downstream::DaemonClient;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
