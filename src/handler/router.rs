//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: preflight short-circuit, method
//! check, route table lookup, CORS decoration and access logging.

use hyper::body::Body as _;
use hyper::header::{HeaderName, CONTENT_LENGTH, REFERER, USER_AGENT};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::config::AppState;
use crate::handler::{music_proxy, static_files};
use crate::http::{self, ResponseBody};
use crate::logger::{self, AccessLogEntry};
use crate::routing::RouteTarget;

/// Main entry point for HTTP request handling
///
/// The request body is never read; every endpoint is driven by method,
/// path and query alone.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<ResponseBody>, Infallible> {
    let started = Instant::now();
    let (parts, _body) = req.into_parts();

    let mut response = dispatch(&parts, &state).await;
    http::apply_cors_headers(response.headers_mut());

    if state.access_log() {
        let entry = access_entry(&parts, &response, peer_addr, started);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Pick the handler for a request
async fn dispatch(parts: &Parts, state: &AppState) -> Response<ResponseBody> {
    match parts.method {
        Method::OPTIONS => return http::build_options_response(),
        Method::GET => {}
        ref other => {
            logger::log_warning(&format!("Method not allowed: {other}"));
            return http::build_405_response();
        }
    }

    let path = parts.uri.path();
    match state.routes.resolve(path) {
        RouteTarget::MusicProxy => music_proxy::handle_music_proxy(parts.uri.query(), state).await,
        RouteTarget::Static => {
            static_files::serve_static(path, &state.serve_root, &state.config.serve.index_files)
                .await
        }
    }
}

fn access_entry(
    parts: &Parts,
    response: &Response<ResponseBody>,
    peer_addr: SocketAddr,
    started: Instant,
) -> AccessLogEntry {
    let header = |name: HeaderName| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.to_string(),
        parts.method.to_string(),
        parts.uri.path().to_string(),
    );
    entry.query = parts.uri.query().map(ToString::to_string);
    entry.http_version = version_label(parts.version).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response.body().size_hint().exact().or_else(|| {
        response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
    });
    entry.referer = header(REFERER);
    entry.user_agent = header(USER_AGENT);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
