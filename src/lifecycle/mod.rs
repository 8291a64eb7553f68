//! Lifecycle subsystem.
//!
//! # Design Decisions
//! - A single broadcast channel coordinates shutdown across tasks
//! - Tests trigger shutdown explicitly; production relies on Ctrl+C

pub mod shutdown;

pub use shutdown::Shutdown;
