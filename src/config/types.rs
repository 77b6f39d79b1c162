// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub fixtures: FixturesConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, `RUST_LOG` takes precedence
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
    /// Seconds a client may take to send request headers, idle keep-alive included
    pub read_timeout: u64,
    /// Seconds to wait for in-flight requests after a shutdown signal
    pub shutdown_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub default_content_type: String,
}

/// Fixture routes configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FixturesConfig {
    /// Directory that relative fixture files are resolved against
    pub responses_dir: String,
    /// Exact-path routes; the built-in table is used when empty
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

/// A single `{path -> file}` entry
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct RouteConfig {
    pub path: String,
    pub file: String,
    /// Overrides `http.default_content_type` for this route
    #[serde(default)]
    pub content_type: Option<String>,
}

impl RouteConfig {
    pub fn new(path: &str, file: &str) -> Self {
        Self {
            path: path.to_string(),
            file: file.to_string(),
            content_type: None,
        }
    }
}

/// Routes served when the configuration names none
pub fn default_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig::new("/diplomdaten", "diplomdaten.xml"),
        RouteConfig::new("/testservice", "testservice.xml"),
        RouteConfig::new("/oneshared", "oneshared.xml"),
    ]
}
