//! Fixture serving
//!
//! Turns a fixture read into a response. Read failures become a 500 with a
//! fixed body; the cause is only logged.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::fixtures::{self, FixtureRoute};
use crate::http;

/// Serve the fixture behind a route
pub async fn serve_fixture(route: &FixtureRoute, is_head: bool) -> Response<Full<Bytes>> {
    match fixtures::load(route).await {
        Ok(data) => http::build_fixture_response(data, &route.content_type, is_head),
        Err(e) => {
            tracing::error!(route = %route.path, "{e}");
            http::build_500_response()
        }
    }
}
