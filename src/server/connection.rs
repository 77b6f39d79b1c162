// Connection handling module
// Accepts a TCP connection and serves HTTP/1.1 on it

use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::{TokioIo, TokioTimer};
use tokio::net::TcpStream;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Accept a connection, enforcing `max_connections`.
///
/// # Arguments
///
/// * `stream` - The TCP stream to handle
/// * `peer_addr` - The peer's socket address
/// * `state` - Shared application state, owns the active connection counter
pub fn accept_connection(stream: TcpStream, peer_addr: SocketAddr, state: &Arc<AppState>) {
    // Increment counter first, then check limit (prevents race condition)
    let prev_count = state.active_connections.fetch_add(1, Ordering::SeqCst);

    if let Some(max_conn) = state.config.performance.max_connections {
        if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
            state.active_connections.fetch_sub(1, Ordering::SeqCst);
            tracing::warn!(
                "Max connections reached: {prev_count}/{max_conn}. Connection from {peer_addr} rejected."
            );
            drop(stream);
            return;
        }
    }

    logger::log_connection_accepted(&peer_addr);
    handle_connection(stream, peer_addr, Arc::clone(state));
}

/// Serve a single connection in a tracked task.
///
/// `read_timeout` bounds how long the client may take to send request
/// headers, including the wait for the next request on a kept-alive
/// connection; zero disables it. Once shutdown is signalled the connection
/// finishes the request in progress and closes.
fn handle_connection(stream: TcpStream, peer_addr: SocketAddr, state: Arc<AppState>) {
    let tracker = state.connections.clone();
    tracker.spawn(async move {
        let io = TokioIo::new(stream);
        let performance = &state.config.performance;

        let mut builder = http1::Builder::new();
        builder
            .timer(TokioTimer::new())
            .keep_alive(performance.keep_alive)
            .header_read_timeout(header_read_timeout(performance.read_timeout));

        let service_state = Arc::clone(&state);
        let conn = builder.serve_connection(
            io,
            service_fn(move |req| handler::handle_request(req, Arc::clone(&service_state), peer_addr)),
        );
        tokio::pin!(conn);

        let result = tokio::select! {
            result = conn.as_mut() => result,
            () = state.shutdown.cancelled() => {
                conn.as_mut().graceful_shutdown();
                conn.await
            }
        };

        match result {
            Ok(()) => {}
            Err(err) if err.is_timeout() => {
                tracing::debug!("Connection from {peer_addr} closed after {}s without a request", performance.read_timeout);
            }
            Err(err) => logger::log_connection_error(&err),
        }

        state.active_connections.fetch_sub(1, Ordering::SeqCst);
    });
}

const fn header_read_timeout(secs: u64) -> Option<Duration> {
    if secs == 0 {
        None
    } else {
        Some(Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_disables_header_timeout() {
        assert_eq!(header_read_timeout(0), None);
        assert_eq!(header_read_timeout(30), Some(Duration::from_secs(30)));
    }
}
