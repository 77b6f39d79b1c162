// Application state module
// Immutable configuration and route table shared by every connection

use std::sync::atomic::{AtomicUsize, Ordering};

use hyper::header::HeaderValue;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use super::types::Config;
use crate::error::ConfigError;
use crate::fixtures::RouteTable;

/// Application state
pub struct AppState {
    pub config: Config,
    pub routes: RouteTable,
    /// `http.server_name`, validated once
    pub server_header: HeaderValue,
    pub active_connections: AtomicUsize,
    /// Cancelled when the accept loop stops; connections finish their current request
    pub shutdown: CancellationToken,
    /// Connection tasks, waited on during shutdown
    pub connections: TaskTracker,
}

impl AppState {
    /// Build state from configuration, validating the route table once
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let routes = RouteTable::from_config(&config.fixtures, &config.http)?;
        let server_header = HeaderValue::from_str(&config.http.server_name).map_err(|_| {
            ConfigError::InvalidHeader {
                name: "Server",
                value: config.http.server_name.clone(),
            }
        })?;

        Ok(Self {
            config,
            routes,
            server_header,
            active_connections: AtomicUsize::new(0),
            shutdown: CancellationToken::new(),
            connections: TaskTracker::new(),
        })
    }

    pub fn connection_count(&self) -> usize {
        self.active_connections.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_server_name() {
        let mut cfg = Config::defaults().unwrap();
        cfg.http.server_name = "soap-backend\r\nX-Injected: 1".to_string();
        let err = AppState::new(cfg).err().unwrap();
        assert!(matches!(err, ConfigError::InvalidHeader { name: "Server", .. }));
    }

    #[test]
    fn test_rejects_invalid_route_content_type() {
        let mut cfg = Config::defaults().unwrap();
        cfg.http.default_content_type = "text/xml\n; charset=utf-8".to_string();
        let err = AppState::new(cfg).err().unwrap();
        assert!(matches!(err, ConfigError::InvalidRoute { .. }));
    }

    #[test]
    fn test_server_header_cached() {
        let state = AppState::new(Config::defaults().unwrap()).unwrap();
        assert_eq!(state.server_header, "soap-backend");
        assert_eq!(state.connection_count(), 0);
    }
}
