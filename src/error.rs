//! Error types
//!
//! Request handlers never surface these to hyper: each variant is mapped to
//! a status code and a plain-text body inside the request that raised it.

use hyper::StatusCode;
use thiserror::Error;

/// Failures of the `target` passthrough
#[derive(Debug, Error)]
pub enum ProxyError {
    /// `target` is not an absolute http(s) URL
    #[error("Invalid target URL: {0}")]
    InvalidTarget(String),

    /// Passthrough disabled or host outside the allow-list
    #[error("Target not allowed: {0}")]
    Forbidden(String),

    /// Connect, DNS, timeout or non-2xx upstream status
    #[error("{0}")]
    Upstream(reqwest::Error),
}

impl ProxyError {
    /// Status code reported to the client
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidTarget(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Plain-text body reported to the client
    pub fn body(&self) -> String {
        match self {
            Self::Upstream(e) => format!("Error proxying target: {}", error_chain(e)),
            other => other.to_string(),
        }
    }
}

/// Redirect hop refused by the passthrough host policy
///
/// Raised inside the HTTP client's redirect policy and recovered from the
/// client error's source chain, so the request is answered with 403 rather
/// than 502.
#[derive(Debug, Error)]
#[error("redirect to {0}")]
pub struct RedirectBlocked(pub String);

impl ProxyError {
    /// Classify an upstream client error
    pub fn from_upstream(err: reqwest::Error) -> Self {
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            if let Some(blocked) = cause.downcast_ref::<RedirectBlocked>() {
                return Self::Forbidden(blocked.to_string());
            }
            source = cause.source();
        }
        Self::Upstream(err)
    }
}

/// Render an error with all of its sources, outermost first
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Startup failures
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid listen address: {0}")]
    Address(String),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ProxyError::InvalidTarget("ftp://x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ProxyError::Forbidden("example.com".into()).status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_error_chain() {
        let inner = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let outer = StartupError::Io(inner);
        assert_eq!(error_chain(&outer), "IO error: refused: refused");
    }

    #[test]
    fn test_body_text() {
        let err = ProxyError::Forbidden("evil.test".into());
        assert_eq!(err.body(), "Target not allowed: evil.test");
    }
}
