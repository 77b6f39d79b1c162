// Server loop module
// Accepts connections until the shutdown future completes, then drains them

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// Run the accept loop on an already bound listener.
///
/// Once `shutdown` resolves the listener is closed and the function waits
/// for connections that are still serving a request, up to
/// `performance.shutdown_timeout` seconds.
#[allow(clippy::ignored_unit_patterns)]
pub async fn start_server_loop<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F)
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => accept_connection(stream, peer_addr, &state),
                    Err(e) => tracing::error!("Failed to accept connection: {e}"),
                }
            }

            _ = &mut shutdown => {
                logger::log_shutdown(state.connection_count());
                break;
            }
        }
    }

    drop(listener);
    drain_connections(&state).await;
}

/// Signal every connection to finish and wait for them, bounded by
/// `shutdown_timeout` (zero waits without a bound)
async fn drain_connections(state: &AppState) {
    state.shutdown.cancel();
    state.connections.close();

    let timeout_secs = state.config.performance.shutdown_timeout;
    if timeout_secs == 0 {
        state.connections.wait().await;
        logger::log_drained();
        return;
    }

    let deadline = tokio::time::Instant::now() + Duration::from_secs(timeout_secs);
    tokio::select! {
        () = state.connections.wait() => logger::log_drained(),
        () = tokio::time::sleep_until(deadline) => {
            tracing::warn!(
                "{} connection(s) still active after {timeout_secs}s, abandoning them",
                state.connection_count()
            );
        }
    }
}
