//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (one of N bound addresses)
//!     → server.rs (bind, accept, graceful drain on cancellation)
//!     → router.rs (shared Router: request ID, tracing, timeout, handlers)
//!     → JSON response
//! ```

pub mod router;
pub mod server;

pub use router::{build_router, AppState};
pub use server::{HttpServer, ServeError};
