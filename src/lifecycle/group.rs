//! Fan-out/fan-in coordination for listener tasks.
//!
//! # Data Flow
//! ```text
//! Shutdown (process-wide token)
//!     → child token, shared by every listener in the group
//!     → spawn N listener tasks (none blocks another's startup)
//!     → first task error cancels the child token (siblings drain)
//!     → wait() joins 100% of tasks, returns the first error or Ok
//! ```
//!
//! # Design Decisions
//! - First error in completion order wins; later errors are logged, never
//!   returned
//! - A failing listener stops its siblings but does not flip the
//!   process-wide shutdown state
//! - wait() never returns before every launched task has reported

use std::future::Future;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::http::server::{HttpServer, ServeError};
use crate::lifecycle::Shutdown;

/// Group of concurrently running listener tasks sharing one cancellation
/// token.
pub struct ServerGroup {
    /// Child of the process-wide shutdown token.
    token: CancellationToken,
    tasks: JoinSet<Result<(), ServeError>>,
}

impl ServerGroup {
    /// Create a group whose tasks observe `shutdown` through a child token.
    pub fn new(shutdown: &Shutdown) -> Self {
        Self {
            token: shutdown.child_token(),
            tasks: JoinSet::new(),
        }
    }

    /// Launch one HTTP server on the shared token.
    pub fn spawn_listener(&mut self, server: HttpServer) {
        let token = self.token.clone();
        self.tasks.spawn(server.run(token));
    }

    /// Launch an arbitrary task on the shared token.
    pub fn spawn<F, Fut>(&mut self, task: F)
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Result<(), ServeError>> + Send + 'static,
    {
        let token = self.token.clone();
        self.tasks.spawn(task(token));
    }

    /// Number of tasks launched so far.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the group has no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Wait for every launched task to reach a terminal state.
    ///
    /// The first task to finish with an error becomes the aggregate result
    /// and cancels the shared token so siblings begin draining. Errors that
    /// arrive afterwards are logged and discarded.
    pub async fn wait(mut self) -> Result<(), ServeError> {
        let mut first_error: Option<ServeError> = None;

        while let Some(joined) = self.tasks.join_next().await {
            let outcome = joined.unwrap_or_else(|join_error| {
                Err(ServeError::Task {
                    reason: join_error.to_string(),
                })
            });

            if let Err(e) = outcome {
                if first_error.is_none() {
                    tracing::error!(error = %e, "Listener failed, stopping siblings");
                    self.token.cancel();
                    first_error = Some(e);
                } else {
                    tracing::warn!(error = %e, "Additional listener failure discarded");
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
