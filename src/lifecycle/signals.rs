//! OS signal handling.
//!
//! # Responsibilities
//! - Register signal handlers (SIGINT, SIGTERM, SIGHUP, SIGQUIT)
//! - Translate signals to internal events
//! - Trigger graceful shutdown on the interactive interrupt
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe, blocking receive, no polling)
//! - All catchable terminating signals are registered; filtering happens in
//!   the watch loop, not at registration
//! - Only SIGINT triggers shutdown; other signals are logged and ignored
//! - The watch loop is fed by a plain channel so tests can drive it without
//!   raising real signals

use tokio::sync::mpsc;

use crate::lifecycle::Shutdown;

/// A process signal observed by the watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalEvent {
    /// Interactive interrupt (SIGINT / Ctrl-C).
    Interrupt,
    /// Termination request (SIGTERM).
    Terminate,
    /// Terminal hangup (SIGHUP).
    Hangup,
    /// Quit request (SIGQUIT).
    Quit,
}

impl std::fmt::Display for SignalEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalEvent::Interrupt => write!(f, "SIGINT"),
            SignalEvent::Terminate => write!(f, "SIGTERM"),
            SignalEvent::Hangup => write!(f, "SIGHUP"),
            SignalEvent::Quit => write!(f, "SIGQUIT"),
        }
    }
}

/// Register OS signal handlers and return the resulting event stream.
///
/// Spawns a forwarder task that translates deliveries into [`SignalEvent`]s.
/// The forwarder runs for the life of the process and exits once the
/// receiving side is dropped. Must be called from within a Tokio runtime.
#[cfg(unix)]
pub fn install() -> std::io::Result<mpsc::Receiver<SignalEvent>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;
    let mut sigquit = signal(SignalKind::quit())?;

    let (tx, rx) = mpsc::channel(8);
    tokio::spawn(async move {
        loop {
            let event = tokio::select! {
                _ = sigint.recv() => SignalEvent::Interrupt,
                _ = sigterm.recv() => SignalEvent::Terminate,
                _ = sighup.recv() => SignalEvent::Hangup,
                _ = sigquit.recv() => SignalEvent::Quit,
            };
            if tx.send(event).await.is_err() {
                break;
            }
        }
    });

    Ok(rx)
}

/// Register OS signal handlers and return the resulting event stream.
///
/// On non-Unix platforms only Ctrl-C is available.
#[cfg(not(unix))]
pub fn install() -> std::io::Result<mpsc::Receiver<SignalEvent>> {
    let (tx, rx) = mpsc::channel(8);
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if tx.send(SignalEvent::Interrupt).await.is_err() {
                break;
            }
        }
    });

    Ok(rx)
}

/// Watch the signal stream and trigger shutdown on the interactive interrupt.
///
/// Any other signal is logged and the watch continues. Returns once the
/// interrupt is observed, the stream ends, or shutdown is triggered
/// elsewhere (e.g. via the stop route).
pub async fn watch(mut events: mpsc::Receiver<SignalEvent>, shutdown: Shutdown) {
    loop {
        tokio::select! {
            received = events.recv() => match received {
                Some(SignalEvent::Interrupt) => {
                    tracing::info!(signal = %SignalEvent::Interrupt, "Shutdown signal received");
                    shutdown.trigger();
                    return;
                }
                Some(other) => {
                    tracing::info!(signal = %other, "Ignoring signal");
                }
                None => {
                    tracing::warn!("Signal stream closed, watcher exiting");
                    return;
                }
            },
            _ = shutdown.triggered() => {
                tracing::debug!("Shutdown triggered elsewhere, watcher exiting");
                return;
            }
        }
    }
}
