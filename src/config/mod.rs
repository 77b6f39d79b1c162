// Configuration module entry point
// Layers defaults, config file, environment and command-line overrides

mod state;
mod types;

use std::net::SocketAddr;

use crate::error::ConfigError;

// Re-export public types
pub use state::AppState;
pub use types::{
    default_routes, Config, FixturesConfig, HttpConfig, LoggingConfig, PerformanceConfig,
    RouteConfig, ServerConfig,
};

/// Default config file name (extension optional)
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Environment variable prefix, e.g. `SOAP_BACKEND_SERVER__PORT=9090`
pub const ENV_PREFIX: &str = "SOAP_BACKEND";

/// Values that win over every other configuration source
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub responses_dir: Option<String>,
}

impl Config {
    /// Load `config.toml` from the working directory if it exists
    pub fn load(overrides: &Overrides) -> Result<Self, ConfigError> {
        Self::build(Some((DEFAULT_CONFIG_PATH, false)), overrides)
    }

    /// Load configuration from an explicitly named file, which must exist
    pub fn load_from(config_path: &str, overrides: &Overrides) -> Result<Self, ConfigError> {
        Self::build(Some((config_path, true)), overrides)
    }

    /// Load without a config file (environment and overrides still apply)
    pub fn from_env(overrides: &Overrides) -> Result<Self, ConfigError> {
        Self::build(None, overrides)
    }

    pub fn defaults() -> Result<Self, ConfigError> {
        Self::from_env(&Overrides::default())
    }

    /// Layer defaults, the file (if any), environment and overrides
    /// Missing keys fall back to built-in defaults
    fn build(file: Option<(&str, bool)>, overrides: &Overrides) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.shutdown_timeout", 30)?
            .set_default("http.server_name", "soap-backend")?
            .set_default("http.default_content_type", "text/xml; charset=utf-8")?
            .set_default("fixtures.responses_dir", "responses")?;

        if let Some((path, required)) = file {
            builder = builder.add_source(config::File::with_name(path).required(required));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.host", overrides.host.clone())?
            .set_override_option("server.port", overrides.port.map(i64::from))?
            .set_override_option("fixtures.responses_dir", overrides.responses_dir.clone())?
            .build()?;

        let mut cfg: Self = settings.try_deserialize()?;
        if cfg.fixtures.routes.is_empty() {
            cfg.fixtures.routes = default_routes();
        }
        Ok(cfg)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidAddress { addr, source })
    }
}
