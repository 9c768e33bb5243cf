//! Shutdown coordination.

use tokio_util::sync::CancellationToken;

/// Coordinator for graceful shutdown.
///
/// Owns the process-wide cancellation state: a done-flag that flips from
/// false to true exactly once and never reverts. All long-running tasks
/// observe the same state through cloned handles.
#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    /// Shared cancellation token.
    token: CancellationToken,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Trigger the shutdown signal.
    ///
    /// Idempotent: the first call flips the done-state and wakes all
    /// waiters; subsequent calls (from any number of concurrent callers)
    /// are no-ops.
    pub fn trigger(&self) {
        self.token.cancel();
    }

    /// Whether shutdown has been triggered.
    pub fn is_triggered(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Wait until shutdown is triggered.
    ///
    /// Resolves immediately if the trigger already happened.
    pub async fn triggered(&self) {
        self.token.cancelled().await;
    }

    /// Get an observer handle on the shutdown state.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Derive a child token.
    ///
    /// The child is cancelled when this coordinator triggers, but cancelling
    /// the child does not flip the process-wide state. Used by the server
    /// group to stop siblings on a listener failure without marking the
    /// whole process as shutting down.
    pub fn child_token(&self) -> CancellationToken {
        self.token.child_token()
    }
}
