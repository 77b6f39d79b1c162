//! Fixture file loading

use hyper::body::Bytes;
use tokio::fs;

use super::table::FixtureRoute;
use crate::error::FixtureError;

/// Read the fixture for a route
///
/// The file is read on every call so edits on disk show up on the next request.
/// Contents are returned byte-for-byte, no transcoding.
pub async fn load(route: &FixtureRoute) -> Result<Bytes, FixtureError> {
    fs::read(&route.file)
        .await
        .map(Bytes::from)
        .map_err(|source| FixtureError::Unavailable {
            path: route.file.clone(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn route_for(file: &Path) -> FixtureRoute {
        FixtureRoute {
            path: "/testservice".to_string(),
            file: file.to_path_buf(),
            content_type: "text/xml; charset=utf-8".to_string(),
        }
    }

    #[tokio::test]
    async fn test_load_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("testservice.xml");
        // BOM and CRLF must survive untouched
        let content = b"\xEF\xBB\xBF<response>ok</response>\r\n";
        std::fs::write(&file, content).unwrap();

        let data = load(&route_for(&file)).await.unwrap();
        assert_eq!(&data[..], content);
    }

    #[tokio::test]
    async fn test_load_missing() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("gone.xml");

        let err = load(&route_for(&file)).await.unwrap_err();
        let FixtureError::Unavailable { path, source } = err else {
            panic!("expected unavailable fixture");
        };
        assert_eq!(path, file);
        assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_load_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(&route_for(dir.path())).await.is_err());
    }
}
