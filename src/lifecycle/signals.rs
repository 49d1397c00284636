//! OS signal handling.
//!
//! # Responsibilities
//! - Wait for SIGINT (Ctrl+C) or SIGTERM
//! - Hand the first one to the shutdown coordinator
//!
//! # Design Decisions
//! - Both handlers install before waiting, so a failure surfaces immediately
//! - A handler that cannot be installed shuts the server down: once tokio
//!   owns a signal the OS default no longer terminates the process

use std::future::Future;
use std::io;

use crate::lifecycle::Shutdown;

/// Resolve when the process is asked to terminate.
pub async fn wait_for_termination() -> io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut interrupt = signal(SignalKind::interrupt())?;
        let mut terminate = signal(SignalKind::terminate())?;
        tokio::select! {
            _ = interrupt.recv() => {}
            _ = terminate.recv() => {}
        }
    }

    #[cfg(not(unix))]
    tokio::signal::ctrl_c().await?;

    Ok(())
}

/// Trigger `shutdown` on the first termination signal.
pub fn spawn_signal_listener(shutdown: Shutdown) -> tokio::task::JoinHandle<()> {
    tokio::spawn(trigger_on(shutdown, wait_for_termination()))
}

/// Trigger `shutdown` once `signal` resolves, whether it saw a signal or
/// failed to listen for one.
pub(crate) async fn trigger_on<F>(shutdown: Shutdown, signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => tracing::info!("Termination signal received"),
        Err(e) => tracing::error!(error = %e, "Signal handling failed, shutting down"),
    }
    shutdown.trigger();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_signal_triggers_shutdown() {
        let shutdown = Shutdown::new();
        let mut rx = shutdown.subscribe();

        trigger_on(shutdown, async { Ok(()) }).await;
        assert!(rx.recv().await.is_ok());
    }

    #[tokio::test]
    async fn test_handler_failure_still_shuts_down() {
        let shutdown = Shutdown::new();
        let mut rx = shutdown.subscribe();

        trigger_on(shutdown, async { Err(io::Error::other("no signal driver")) }).await;
        assert!(rx.recv().await.is_ok());
    }
}
