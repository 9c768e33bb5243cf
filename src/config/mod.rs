//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → Config (validated, immutable)
//!     → shared with the router, listeners, and observability at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload
//! - All fields have defaults to allow minimal configs; with no file at all
//!   the stock two-listener loopback pair is used
//! - Validation separates syntactic (serde) from semantic checks and
//!   reports every problem, not just the first

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{Config, ListenerConfig, ObservabilityConfig, ShutdownConfig, TimeoutConfig};
pub use validation::{validate_config, ValidationError};
