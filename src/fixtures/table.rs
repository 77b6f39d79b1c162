//! Route table
//!
//! Maps exact request paths to fixture files. Built once at startup from
//! configuration and never modified afterwards.

use std::path::{Path, PathBuf};

use hyper::header::HeaderValue;

use crate::config::{FixturesConfig, HttpConfig, RouteConfig};
use crate::error::{ConfigError, FixtureError};

/// A registered path and the fixture it returns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureRoute {
    pub path: String,
    /// Resolved against `responses_dir` unless absolute
    pub file: PathBuf,
    pub content_type: String,
}

/// Immutable, ordered set of fixture routes
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<FixtureRoute>,
}

impl RouteTable {
    pub fn from_config(fixtures: &FixturesConfig, http: &HttpConfig) -> Result<Self, ConfigError> {
        let base = Path::new(&fixtures.responses_dir);
        let mut routes: Vec<FixtureRoute> = Vec::with_capacity(fixtures.routes.len());

        for route in &fixtures.routes {
            validate_route(route)?;
            if routes.iter().any(|r| r.path == route.path) {
                return Err(ConfigError::DuplicateRoute(route.path.clone()));
            }
            let content_type = route
                .content_type
                .clone()
                .unwrap_or_else(|| http.default_content_type.clone());
            if HeaderValue::from_str(&content_type).is_err() {
                return Err(ConfigError::InvalidRoute {
                    path: route.path.clone(),
                    reason: format!("content type {content_type:?} is not a valid header value"),
                });
            }
            routes.push(FixtureRoute {
                path: route.path.clone(),
                file: base.join(&route.file),
                content_type,
            });
        }

        Ok(Self { routes })
    }

    /// Exact path lookup
    pub fn get(&self, path: &str) -> Option<&FixtureRoute> {
        self.routes.iter().find(|r| r.path == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FixtureRoute> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Routes whose fixture file is not currently a readable regular file
    pub fn missing_files(&self) -> Vec<&FixtureRoute> {
        self.routes.iter().filter(|r| !r.file.is_file()).collect()
    }

    /// Verify every fixture file exists, warning once per missing file
    pub fn check(&self) -> Result<(), FixtureError> {
        let missing = self.missing_files();
        if missing.is_empty() {
            return Ok(());
        }

        for route in &missing {
            tracing::warn!(
                "Fixture for {} not found at {}",
                route.path,
                route.file.display()
            );
        }
        Err(FixtureError::Missing {
            routes: missing.iter().map(|r| r.path.clone()).collect(),
            total: self.len(),
        })
    }
}

fn validate_route(route: &RouteConfig) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidRoute {
        path: route.path.clone(),
        reason: reason.to_string(),
    };

    if !route.path.starts_with('/') {
        return Err(invalid("path must start with '/'"));
    }
    if route.path.contains(|c: char| c == '?' || c == '#') {
        return Err(invalid("path must not contain a query or fragment"));
    }
    if route.file.trim().is_empty() {
        return Err(invalid("file must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_routes;

    fn http_config() -> HttpConfig {
        HttpConfig {
            server_name: "soap-backend".to_string(),
            default_content_type: "text/xml; charset=utf-8".to_string(),
        }
    }

    fn fixtures(routes: Vec<RouteConfig>) -> FixturesConfig {
        FixturesConfig {
            responses_dir: "responses".to_string(),
            routes,
        }
    }

    #[test]
    fn test_default_table() {
        let table = RouteTable::from_config(&fixtures(default_routes()), &http_config()).unwrap();
        assert_eq!(table.len(), 3);

        let route = table.get("/testservice").unwrap();
        assert_eq!(route.file, Path::new("responses").join("testservice.xml"));
        assert_eq!(route.content_type, "text/xml; charset=utf-8");

        let paths: Vec<&str> = table.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, ["/diplomdaten", "/testservice", "/oneshared"]);
    }

    #[test]
    fn test_exact_match_only() {
        let table = RouteTable::from_config(&fixtures(default_routes()), &http_config()).unwrap();
        assert!(table.get("/testservice/").is_none());
        assert!(table.get("/testservice/extra").is_none());
        assert!(table.get("/TestService").is_none());
        assert!(table.get("/").is_none());
    }

    #[test]
    fn test_content_type_override() {
        let mut route = RouteConfig::new("/soap12", "soap12.xml");
        route.content_type = Some("application/soap+xml; charset=utf-8".to_string());
        let table = RouteTable::from_config(&fixtures(vec![route]), &http_config()).unwrap();
        assert_eq!(
            table.get("/soap12").unwrap().content_type,
            "application/soap+xml; charset=utf-8"
        );
    }

    #[test]
    fn test_absolute_file_kept() {
        let route = RouteConfig::new("/abs", "/srv/fixtures/abs.xml");
        let table = RouteTable::from_config(&fixtures(vec![route]), &http_config()).unwrap();
        assert_eq!(table.get("/abs").unwrap().file, Path::new("/srv/fixtures/abs.xml"));
    }

    #[test]
    fn test_rejects_duplicate_paths() {
        let routes = vec![
            RouteConfig::new("/dup", "a.xml"),
            RouteConfig::new("/dup", "b.xml"),
        ];
        let err = RouteTable::from_config(&fixtures(routes), &http_config()).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateRoute(p) if p == "/dup"));
    }

    #[test]
    fn test_rejects_invalid_paths() {
        for path in ["relative", "/with?query", "/with#frag"] {
            let routes = vec![RouteConfig::new(path, "a.xml")];
            let err = RouteTable::from_config(&fixtures(routes), &http_config()).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidRoute { .. }), "{path}");
        }

        let routes = vec![RouteConfig::new("/empty", "  ")];
        assert!(RouteTable::from_config(&fixtures(routes), &http_config()).is_err());
    }

    #[test]
    fn test_rejects_invalid_content_type() {
        let mut route = RouteConfig::new("/broken", "broken.xml");
        route.content_type = Some("text/xml\n; charset=utf-8".to_string());
        let err = RouteTable::from_config(&fixtures(vec![route]), &http_config()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRoute { ref path, .. } if path == "/broken"));

        let mut http = http_config();
        http.default_content_type = "text/xml\r\nX-Injected: 1".to_string();
        let err = RouteTable::from_config(&fixtures(default_routes()), &http).unwrap_err();
        assert!(err.to_string().contains("/diplomdaten"), "{err}");
    }

    #[test]
    fn test_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("present.xml"), "<ok/>").unwrap();

        let cfg = FixturesConfig {
            responses_dir: dir.path().to_string_lossy().into_owned(),
            routes: vec![
                RouteConfig::new("/present", "present.xml"),
                RouteConfig::new("/absent", "absent.xml"),
            ],
        };
        let table = RouteTable::from_config(&cfg, &http_config()).unwrap();
        let missing: Vec<&str> = table.missing_files().iter().map(|r| r.path.as_str()).collect();
        assert_eq!(missing, ["/absent"]);
    }

    #[test]
    fn test_check_all_present() {
        let dir = tempfile::tempdir().unwrap();
        for route in default_routes() {
            std::fs::write(dir.path().join(&route.file), "<ok/>").unwrap();
        }
        let cfg = FixturesConfig {
            responses_dir: dir.path().to_string_lossy().into_owned(),
            routes: default_routes(),
        };
        let table = RouteTable::from_config(&cfg, &http_config()).unwrap();
        assert!(table.check().is_ok());
    }

    #[test]
    fn test_check_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("diplomdaten.xml"), "<ok/>").unwrap();
        std::fs::write(dir.path().join("oneshared.xml"), "<ok/>").unwrap();
        let cfg = FixturesConfig {
            responses_dir: dir.path().to_string_lossy().into_owned(),
            routes: default_routes(),
        };
        let table = RouteTable::from_config(&cfg, &http_config()).unwrap();

        let err = table.check().unwrap_err();
        let FixtureError::Missing { routes, total } = &err else {
            panic!("expected missing fixtures, got {err}");
        };
        assert_eq!(routes, &["/testservice"]);
        assert_eq!(*total, 3);
        assert_eq!(err.to_string(), "1 of 3 fixture file(s) missing: /testservice");
    }
}
