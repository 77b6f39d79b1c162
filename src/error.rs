//! Error types shared across the crate

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid listen address '{addr}': {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: AddrParseError,
    },

    #[error("invalid route '{path}': {reason}")]
    InvalidRoute { path: String, reason: String },

    #[error("invalid {name} header value {value:?}")]
    InvalidHeader { name: &'static str, value: String },

    #[error("route '{0}' is registered more than once")]
    DuplicateRoute(String),
}

/// Fixture file could not be served, or is missing from disk
#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("fixture '{}' unavailable: {source}", .path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} of {total} fixture file(s) missing: {}", .routes.len(), .routes.join(", "))]
    Missing { routes: Vec<String>, total: usize },
}

/// Listener setup errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to register signal handler: {0}")]
    Signal(#[source] std::io::Error),
}
