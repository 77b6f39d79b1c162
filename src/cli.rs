// Command line interface
// Flags override values from the config file and environment

use clap::Parser;

use soap_backend::config::{Overrides, DEFAULT_CONFIG_PATH};

#[derive(Parser, Debug)]
#[command(name = "soap-backend", version, about = "Serve fixed XML fixtures in place of a SOAP backend")]
pub struct Cli {
    /// Configuration file, must exist (extension may be omitted)
    /// [default: config.toml, loaded only if present]
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Bind host, overrides server.host
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port, overrides server.port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory fixture files are resolved against, overrides fixtures.responses_dir
    #[arg(long, value_name = "DIR")]
    pub responses_dir: Option<String>,

    /// Verify every fixture file exists and exit
    #[arg(long)]
    pub check: bool,
}

impl Cli {
    /// Path to report in errors: the explicit file or the default
    pub fn config_path(&self) -> &str {
        self.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH)
    }

    pub fn overrides(&self) -> Overrides {
        Overrides {
            host: self.host.clone(),
            port: self.port,
            responses_dir: self.responses_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["soap-backend"]).unwrap();
        assert!(cli.config.is_none());
        assert_eq!(cli.config_path(), "config.toml");
        assert!(!cli.check);
        let overrides = cli.overrides();
        assert!(overrides.host.is_none());
        assert!(overrides.port.is_none());
        assert!(overrides.responses_dir.is_none());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "soap-backend",
            "--config",
            "/etc/soap-backend/config",
            "--host",
            "127.0.0.1",
            "-p",
            "9000",
            "--responses-dir",
            "./fixtures",
            "--check",
        ])
        .unwrap();
        assert_eq!(cli.config.as_deref(), Some("/etc/soap-backend/config"));
        assert_eq!(cli.config_path(), "/etc/soap-backend/config");
        assert!(cli.check);
        let overrides = cli.overrides();
        assert_eq!(overrides.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(overrides.port, Some(9000));
        assert_eq!(overrides.responses_dir.as_deref(), Some("./fixtures"));
    }

    #[test]
    fn test_rejects_bad_port() {
        assert!(Cli::try_parse_from(["soap-backend", "--port", "70000"]).is_err());
    }
}
