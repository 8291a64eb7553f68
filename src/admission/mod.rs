//! Admission control subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request
//!     → gate.rs (acquire a slot; suspend if the route is saturated)
//!     → protected operation runs while the slot is held
//!     → slot released on drop (success and failure paths identical)
//! ```
//!
//! # Design Decisions
//! - Callers block rather than being rejected; there is no queue bound
//!   and no wait timeout
//! - One gate per protected route; gates are independent of each other
//! - The set-values gate defaults to capacity 1, serializing every write
//!   against the control daemon

pub mod gate;

pub use gate::{AdmissionGate, SlotPermit};
