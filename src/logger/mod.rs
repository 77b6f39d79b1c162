//! Logger module
//!
//! Provides logging utilities for the fixture server including:
//! - Subscriber setup from the `[logging]` section
//! - Server lifecycle logging
//! - Access logging with multiple formats

mod format;

pub use format::AccessLogEntry;

use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, LoggingConfig};
use crate::fixtures::RouteTable;
use crate::http::ALLOWED_METHODS;

/// Target used for access log lines so they can be filtered separately
pub const ACCESS_TARGET: &str = "access";

/// Initialize the global subscriber
///
/// Should be called once at application startup. `RUST_LOG` wins over
/// `logging.level`.
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false),
        )
        .try_init()?;
    Ok(())
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    tracing::info!("======================================");
    tracing::info!("SOAP fixture backend started");
    tracing::info!("Listening on: http://{addr}");
    tracing::info!("Responses directory: {}", config.fixtures.responses_dir);
    if let Some(workers) = config.server.workers {
        tracing::info!("Worker threads: {workers}");
    }
    if let Some(max) = config.performance.max_connections {
        tracing::info!("Max connections: {max}");
    }
    tracing::info!("======================================");
}

/// Print the route table, one line per route
pub fn log_route_table(routes: &RouteTable) {
    tracing::info!("Registered {} fixture route(s):", routes.len());
    for route in routes.iter() {
        tracing::info!(
            "  {:<28} {} -> {} ({})",
            ALLOWED_METHODS,
            route.path,
            route.file.display(),
            route.content_type
        );
    }
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    tracing::debug!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    tracing::error!("Failed to serve connection: {err:?}");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    tracing::info!(target: ACCESS_TARGET, "{}", entry.format(format));
}

pub fn log_shutdown(active_connections: usize) {
    tracing::info!(
        "Shutdown requested, no longer accepting connections ({active_connections} still active)"
    );
}

pub fn log_drained() {
    tracing::info!("All connections closed");
}
