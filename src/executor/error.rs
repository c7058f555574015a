//! HTTP request execution error types.

use std::fmt;

/// Errors that can occur while building or executing an HTTP request.
#[derive(Debug)]
pub enum RequestError {
    /// Network error: connection failures, DNS resolution errors, and
    /// other transport-level issues.
    NetworkError(String),

    /// The request took longer than the configured timeout.
    Timeout,

    /// The call's URL could not be parsed.
    InvalidUrl(String),

    /// The request could not be constructed from the call description.
    BuildError(String),

    /// The call body cannot be encoded as declared; form bodies must be
    /// flat mappings of scalars.
    UnsupportedBody(String),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            RequestError::Timeout => write!(f, "Request timed out"),
            RequestError::InvalidUrl(url) => write!(f, "Invalid URL: {}", url),
            RequestError::BuildError(msg) => write!(f, "Request build error: {}", msg),
            RequestError::UnsupportedBody(msg) => write!(f, "Unsupported body: {}", msg),
        }
    }
}

impl std::error::Error for RequestError {}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RequestError::Timeout
        } else if err.is_builder() {
            RequestError::BuildError(err.to_string())
        } else {
            RequestError::NetworkError(err.to_string())
        }
    }
}

impl From<url::ParseError> for RequestError {
    fn from(err: url::ParseError) -> Self {
        RequestError::InvalidUrl(err.to_string())
    }
}
