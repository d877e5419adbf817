//! `target` passthrough
//!
//! Streams a remote resource to the client. The upstream response is owned
//! by the body stream, so the connection is released when the copy ends,
//! when a read fails, or when hyper drops the body after a client disconnect.

use bytes::BytesMut;
use http_body_util::{BodyExt, StreamBody};
use hyper::body::Frame;
use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE};
use hyper::{Response, StatusCode};
use reqwest::redirect;
use url::Url;

use crate::config::{AppState, ProxyConfig};
use crate::error::{ProxyError, RedirectBlocked};
use crate::http::{self, ResponseBody};
use crate::logger;

const MAX_REDIRECTS: usize = 10;

/// Proxy `target` and translate every failure into a client response
pub async fn proxy_target(raw_target: &str, state: &AppState) -> Response<ResponseBody> {
    let result = match validate_target(raw_target, &state.config.proxy) {
        Ok(url) => forward(&state.http_client, url, state.config.proxy.chunk_size).await,
        Err(e) => Err(e),
    };

    result.unwrap_or_else(|e| {
        match &e {
            ProxyError::Upstream(_) => {
                logger::log_error(&format!("Passthrough to '{raw_target}' failed: {e}"));
            }
            _ => logger::log_warning(&format!("Passthrough rejected: {e}")),
        }
        http::build_text_response(e.status(), e.body())
    })
}

/// Check that `target` is an absolute http(s) URL permitted by the policy
pub fn validate_target(raw: &str, policy: &ProxyConfig) -> Result<Url, ProxyError> {
    if !policy.enabled {
        return Err(ProxyError::Forbidden("passthrough is disabled".to_string()));
    }

    let url = Url::parse(raw).map_err(|e| ProxyError::InvalidTarget(format!("{raw} ({e})")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ProxyError::InvalidTarget(format!(
            "unsupported scheme '{}'",
            url.scheme()
        )));
    }

    let host = url
        .host_str()
        .ok_or_else(|| ProxyError::InvalidTarget(format!("{raw} (missing host)")))?;
    if !policy.is_host_allowed(host) {
        return Err(ProxyError::Forbidden(host.to_string()));
    }

    Ok(url)
}

/// Redirect policy for the passthrough client
///
/// Every hop must pass the same host check as the original `target`.
/// Refused hops surface as [`RedirectBlocked`] in the client error.
pub fn redirect_policy(policy: &ProxyConfig) -> redirect::Policy {
    let policy = policy.clone();
    redirect::Policy::custom(move |attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            return attempt.error("too many redirects");
        }
        let host = attempt.url().host_str().unwrap_or_default().to_string();
        if policy.is_host_allowed(&host) {
            attempt.follow()
        } else {
            attempt.error(RedirectBlocked(host))
        }
    })
}

/// Open the upstream and build a streaming 200 response
///
/// A single attempt; non-2xx upstream statuses count as failures.
pub async fn forward(
    client: &reqwest::Client,
    target: Url,
    chunk_size: usize,
) -> Result<Response<ResponseBody>, ProxyError> {
    let upstream = client
        .get(target)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(ProxyError::from_upstream)?;

    let mut builder = Response::builder().status(StatusCode::OK);
    if let Some(content_type) = upstream.headers().get(CONTENT_TYPE) {
        builder = builder.header(CONTENT_TYPE, content_type.clone());
    }
    if let Some(content_length) = upstream.headers().get(CONTENT_LENGTH) {
        builder = builder.header(CONTENT_LENGTH, content_length.clone());
    }

    Ok(builder
        .body(chunked_body(upstream, chunk_size.max(1)))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build passthrough response: {e}"));
            Response::new(http::empty())
        }))
}

/// Re-chunk the upstream body into `chunk_size` frames
fn chunked_body(mut upstream: reqwest::Response, chunk_size: usize) -> ResponseBody {
    let frames = async_stream::stream! {
        let mut pending = BytesMut::with_capacity(chunk_size);
        loop {
            match upstream.chunk().await {
                Ok(Some(bytes)) => {
                    pending.extend_from_slice(&bytes);
                    while pending.len() >= chunk_size {
                        yield Ok(Frame::data(pending.split_to(chunk_size).freeze()));
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    logger::log_error(&format!("Passthrough read failed: {e}"));
                    pending.clear();
                    yield Err(std::io::Error::other(e));
                    break;
                }
            }
        }
        if !pending.is_empty() {
            yield Ok::<_, std::io::Error>(Frame::data(pending.freeze()));
        }
    };

    StreamBody::new(frames).boxed_unsync()
}
