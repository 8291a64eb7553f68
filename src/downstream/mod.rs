//! Downstream forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! ChannelCommand
//!     → client.rs (dial the daemon socket; backoff.rs paces transient retries)
//!     → single write of the encoded command, then the stream is dropped
//!     → no acknowledgment is read; the daemon is fire-and-forget
//! ```
//!
//! # Design Decisions
//! - Each request dials its own connection; nothing is pooled or shared
//! - Dial retries are bounded; exhaustion is a typed error, never a hang
//! - A dial failure never terminates the process, only the request

pub mod backoff;
pub mod client;

pub use client::{DaemonClient, ForwardError};
