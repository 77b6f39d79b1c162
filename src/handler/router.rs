//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: exact path lookup, method
//! dispatch and access logging.

use std::borrow::Cow;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderName, REFERER, SERVER, USER_AGENT};
use hyper::{Method, Request, Response, Version};
use percent_encoding::percent_decode_str;

use crate::config::AppState;
use crate::fixtures::FixtureRoute;
use crate::handler::fixture;
use crate::http;
use crate::logger::{self, AccessLogEntry};

/// Main entry point for HTTP request handling
///
/// The request body is never read, so any body type is accepted.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let path = decode_path(req.uri().path());

    let mut response = match path.as_deref().and_then(|p| state.routes.get(p)) {
        Some(route) => dispatch_method(&method, route).await,
        None => {
            tracing::debug!("No fixture registered for {method} {}", req.uri().path());
            http::build_404_response()
        }
    };

    response
        .headers_mut()
        .insert(SERVER, state.server_header.clone());

    if state.config.logging.access_log {
        let entry = build_access_entry(&req, &response, peer_addr, started);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Percent-decode a request path for lookup; `None` if it is not UTF-8
fn decode_path(raw: &str) -> Option<String> {
    percent_decode_str(raw)
        .decode_utf8()
        .ok()
        .map(Cow::into_owned)
}

/// Dispatch a matched route by method
async fn dispatch_method(method: &Method, route: &FixtureRoute) -> Response<Full<Bytes>> {
    match *method {
        Method::GET | Method::POST => fixture::serve_fixture(route, false).await,
        Method::HEAD => fixture::serve_fixture(route, true).await,
        Method::OPTIONS => http::build_options_response(),
        _ => {
            tracing::warn!("Method not allowed: {method} {}", route.path);
            http::build_405_response()
        }
    }
}

fn build_access_entry<B>(
    req: &Request<B>,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    started: Instant,
) -> AccessLogEntry {
    let header = |name: HeaderName| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_label(req.version()).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0);
    entry.referer = header(REFERER);
    entry.user_agent = header(USER_AGENT);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}

const fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
