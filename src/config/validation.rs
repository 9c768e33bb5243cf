//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate listener addresses parse as socket addresses
//! - Detect duplicate bind addresses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: Config → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use crate::config::schema::Config;

/// A single semantic problem found in the configuration.
#[derive(Debug)]
pub enum ValidationError {
    /// No listeners configured; the server would have nothing to bind.
    NoListeners,
    /// A bind address does not parse as `host:port`.
    InvalidAddress { address: String, reason: String },
    /// The same bind address appears more than once.
    DuplicateAddress { address: String },
    /// The metrics endpoint address does not parse.
    InvalidMetricsAddress { address: String, reason: String },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::NoListeners => write!(f, "no listeners configured"),
            ValidationError::InvalidAddress { address, reason } => {
                write!(f, "invalid bind address '{}': {}", address, reason)
            }
            ValidationError::DuplicateAddress { address } => {
                write!(f, "duplicate bind address '{}'", address)
            }
            ValidationError::InvalidMetricsAddress { address, reason } => {
                write!(f, "invalid metrics address '{}': {}", address, reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listeners.is_empty() {
        errors.push(ValidationError::NoListeners);
    }

    let mut seen = HashSet::new();
    for listener in &config.listeners {
        if let Err(e) = listener.bind_address.parse::<SocketAddr>() {
            errors.push(ValidationError::InvalidAddress {
                address: listener.bind_address.clone(),
                reason: e.to_string(),
            });
        }
        if !seen.insert(listener.bind_address.as_str()) {
            errors.push(ValidationError::DuplicateAddress {
                address: listener.bind_address.clone(),
            });
        }
    }

    if config.observability.metrics_enabled {
        if let Err(e) = config.observability.metrics_address.parse::<SocketAddr>() {
            errors.push(ValidationError::InvalidMetricsAddress {
                address: config.observability.metrics_address.clone(),
                reason: e.to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
