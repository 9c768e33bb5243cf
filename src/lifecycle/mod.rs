//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Trigger (signals.rs or the /stop route):
//!     SIGINT or GET /stop → Shutdown::trigger() → token flips once
//!
//! Shutdown (shutdown.rs):
//!     One cancellation token, created at startup, shared by reference,
//!     flipped at most once, never reset
//!
//! Fan-out/fan-in (group.rs):
//!     ServerGroup derives a child token → spawns one task per listener →
//!     first error cancels siblings → wait() joins all, yields first error
//! ```
//!
//! # Design Decisions
//! - Cancellation is cooperative and one-directional; observers wake on the
//!   token, there is no polling
//! - Signal filtering happens in-process: only the interactive interrupt
//!   triggers shutdown, other signals are logged and ignored
//! - Draining is bounded by a grace period; listeners force-close rather
//!   than hang on stuck connections

pub mod group;
pub mod shutdown;
pub mod signals;

pub use group::ServerGroup;
pub use shutdown::Shutdown;
