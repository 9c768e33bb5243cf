//! Multi-listener HTTP server with coordinated graceful shutdown.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::Config;
pub use http::{HttpServer, ServeError};
pub use lifecycle::{ServerGroup, Shutdown};
