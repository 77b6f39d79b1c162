//! Fixture HTTP server that stands in for a SOAP backend.
//!
//! A fixed table of exact paths, each answering GET, HEAD and POST with the
//! verbatim contents of an XML file on disk. See `config.example.toml` for
//! the available settings.

pub mod config;
pub mod error;
pub mod fixtures;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use config::{AppState, Config};
pub use error::{ConfigError, FixtureError, ServerError};
