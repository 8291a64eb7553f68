//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, graceful shutdown)
//!     → handlers.rs (validate body/query, acquire admission gate slot)
//!     → downstream forwarder (dial daemon socket, write command)
//!     → 200 `OK (<command>)` / 400 / 502 / 503
//! ```

pub mod handlers;
pub mod server;

pub use server::{AppState, HttpServer};
