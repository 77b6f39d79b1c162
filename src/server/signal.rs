// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)

use crate::error::ServerError;

/// Registered shutdown signals
///
/// Registration happens up front so a failure aborts startup instead of
/// leaving a server that cannot be stopped cleanly.
pub struct ShutdownSignal {
    #[cfg(unix)]
    sigterm: tokio::signal::unix::Signal,
    #[cfg(unix)]
    sigint: tokio::signal::unix::Signal,
}

impl ShutdownSignal {
    /// Register handlers; must be called from within the runtime
    #[cfg(unix)]
    pub fn register() -> Result<Self, ServerError> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            sigterm: signal(SignalKind::terminate()).map_err(ServerError::Signal)?,
            sigint: signal(SignalKind::interrupt()).map_err(ServerError::Signal)?,
        })
    }

    /// Windows fallback - only handles Ctrl+C
    #[cfg(not(unix))]
    #[allow(clippy::unnecessary_wraps)]
    pub fn register() -> Result<Self, ServerError> {
        Ok(Self {})
    }

    /// Wait for the first shutdown signal
    #[cfg(unix)]
    pub async fn recv(mut self) {
        let name = tokio::select! {
            _ = self.sigterm.recv() => "SIGTERM",
            _ = self.sigint.recv() => "SIGINT (Ctrl+C)",
        };
        tracing::info!("[SIGNAL] {name} received, initiating graceful shutdown");
    }

    #[cfg(not(unix))]
    pub async fn recv(self) {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("[SIGNAL] Ctrl+C received, initiating graceful shutdown"),
            Err(e) => {
                tracing::error!("[SIGNAL] Failed to listen for Ctrl+C: {e}");
                std::future::pending::<()>().await;
            }
        }
    }
}
