//! Error types for the request helper.
//!
//! # Design
//! Status failures are split into `ClientError` and `ServerError` so callers
//! can branch on the range without re-checking the number. Both keep the raw
//! status and body. A transport failure never has a status. Deserialization
//! errors are surfaced instead of degrading to raw text, so a malformed
//! server response is never mistaken for data.

use std::fmt;

use thiserror::Error;

/// Errors returned by `RequestHelper`.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The server answered with a status in 400..=499.
    #[error("HTTP {status} (client error): {body}")]
    ClientError { status: u16, body: String },

    /// The server answered with a status of 500 or above.
    #[error("HTTP {status} (server error): {body}")]
    ServerError { status: u16, body: String },

    /// No response was received (DNS, refused connection, aborted stream).
    #[error("network error: {0}")]
    Network(String),

    /// The response body is not valid JSON, or not the requested shape.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A response arrived but its body exceeded the transport's limit.
    #[error("HTTP {status}: response body exceeds {limit} bytes")]
    BodyTooLarge { status: u16, limit: u64 },

    #[error("invalid HTTP method: {0:?}")]
    InvalidMethod(String),

    /// A relative URL was given and no base URL is configured.
    #[error("cannot resolve relative URL {0:?} without a base URL")]
    InvalidUrl(String),
}

impl RequestError {
    /// The status code the server answered with, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::ClientError { status, .. }
            | RequestError::ServerError { status, .. }
            | RequestError::BodyTooLarge { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn cause(&self) -> Option<FailureCause> {
        match self {
            RequestError::ClientError { .. } => Some(FailureCause::ClientError),
            RequestError::ServerError { .. } => Some(FailureCause::ServerError),
            RequestError::Network(_) => Some(FailureCause::NetworkError),
            RequestError::BodyTooLarge { status, .. } => FailureCause::from_status(*status),
            _ => None,
        }
    }
}

/// Coarse classification of a failed round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCause {
    ClientError,
    ServerError,
    NetworkError,
}

impl FailureCause {
    /// The cause implied by an error status; `None` below 400.
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            400..=499 => Some(FailureCause::ClientError),
            500.. => Some(FailureCause::ServerError),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FailureCause::ClientError => "client-error",
            FailureCause::ServerError => "server-error",
            FailureCause::NetworkError => "network-error",
        }
    }
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure reported by a `Transport`.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Nothing came back: DNS, refused connection, broken stream.
    #[error("{0}")]
    NoResponse(String),

    /// The status line arrived but the body ran past the read limit.
    #[error("response body exceeds {limit} bytes (status {status})")]
    BodyTooLarge { status: u16, limit: u64 },
}

impl From<TransportError> for RequestError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::NoResponse(msg) => RequestError::Network(msg),
            TransportError::BodyTooLarge { status, limit } => {
                RequestError::BodyTooLarge { status, limit }
            }
        }
    }
}
