//! Configuration validation.
//!
//! Serde handles the syntactic side; these checks are semantic. All errors
//! are collected and returned together rather than stopping at the first.

use std::net::SocketAddr;

use crate::config::schema::RelayConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, PartialEq, Eq)]
pub enum ValidationError {
    EmptyBindAddress,
    InvalidBindAddress(String),
    ZeroGateCapacity(&'static str),
    ZeroRetryAttempts,
    BackoffBaseExceedsCap { base_ms: u64, max_ms: u64 },
    InvalidMetricsAddress(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyBindAddress => write!(f, "listener.bind_address is empty"),
            ValidationError::InvalidBindAddress(addr) => {
                write!(f, "listener.bind_address `{}` is not a socket address", addr)
            }
            ValidationError::ZeroGateCapacity(route) => {
                write!(f, "admission.{} must be at least 1", route)
            }
            ValidationError::ZeroRetryAttempts => {
                write!(f, "retry.max_attempts must be at least 1")
            }
            ValidationError::BackoffBaseExceedsCap { base_ms, max_ms } => write!(
                f,
                "retry.base_delay_ms ({}) exceeds retry.max_delay_ms ({})",
                base_ms, max_ms
            ),
            ValidationError::InvalidMetricsAddress(addr) => write!(
                f,
                "observability.metrics_address `{}` is not a socket address",
                addr
            ),
        }
    }
}

/// Validate a configuration, returning every problem found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.is_empty() {
        errors.push(ValidationError::EmptyBindAddress);
    } else if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.admission.set_slots == 0 {
        errors.push(ValidationError::ZeroGateCapacity("set_slots"));
    }
    if config.admission.status_slots == 0 {
        errors.push(ValidationError::ZeroGateCapacity("status_slots"));
    }

    if config.retry.max_attempts == 0 {
        errors.push(ValidationError::ZeroRetryAttempts);
    }
    if config.retry.base_delay_ms > config.retry.max_delay_ms {
        errors.push(ValidationError::BackoffBaseExceedsCap {
            base_ms: config.retry.base_delay_ms,
            max_ms: config.retry.max_delay_ms,
        });
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
