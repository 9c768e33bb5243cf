//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the multi-listener server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    /// Listener definitions, one per bound address.
    pub listeners: Vec<ListenerConfig>,

    /// Shutdown behavior.
    pub shutdown: ShutdownConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Configuration with the stock pair of loopback listeners.
    ///
    /// Used when no config file is given; `Config::default()` derives an
    /// empty listener list, which validation rejects.
    pub fn standard() -> Self {
        Self {
            listeners: vec![
                ListenerConfig {
                    bind_address: "127.0.0.1:8080".to_string(),
                },
                ListenerConfig {
                    bind_address: "127.0.0.1:9090".to_string(),
                },
            ],
            ..Self::default()
        }
    }
}

/// One listener endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

/// Shutdown configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ShutdownConfig {
    /// Grace period in seconds for draining in-flight connections after
    /// shutdown is requested. Connections still open past it are cut.
    pub grace_secs: u64,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self { grace_secs: 10 }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Per-request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Whether to expose Prometheus metrics.
    pub metrics_enabled: bool,

    /// Address for the metrics exposition endpoint.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9100".to_string(),
        }
    }
}
