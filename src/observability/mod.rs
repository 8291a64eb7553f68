//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via the tracing crate, initialized in main
//! - Metrics exposed through a Prometheus endpoint, disabled by default
//! - Metric updates are fire-and-forget; handlers never block on them

pub mod metrics;
