//! Probe error taxonomy.
//!
//! Every variant except a malformed JSON body is terminal for the invocation
//! and maps to exit code 1. Malformed bodies are modeled as `None` in
//! [`crate::report::HealthData`] parsing instead of an error.

use std::fmt;
use std::io;

use http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    #[error("network error ({cause}): {source}")]
    Network {
        cause: NetworkCause,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected HTTP status {status}")]
    BadStatus { status: StatusCode, body: String },
}

impl ProbeError {
    /// Map a reqwest transport failure to the probe taxonomy.
    ///
    /// The client enforces the timeout itself and aborts the in-flight
    /// connection, so a timeout surfaces here as a regular send error.
    pub fn from_transport(err: reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            return Self::Timeout { timeout_ms };
        }

        let cause = io_cause(&err)
            .or_else(|| dns_failure(&err).then_some(NetworkCause::HostNotFound))
            .unwrap_or(NetworkCause::Other);

        Self::Network { cause, source: err }
    }
}

/// Underlying cause of a connection-level failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkCause {
    Refused,
    HostNotFound,
    Reset,
    Other,
}

impl NetworkCause {
    pub(crate) fn from_io(kind: io::ErrorKind) -> Option<Self> {
        match kind {
            io::ErrorKind::ConnectionRefused => Some(Self::Refused),
            io::ErrorKind::ConnectionReset | io::ErrorKind::ConnectionAborted => Some(Self::Reset),
            _ => None,
        }
    }
}

impl fmt::Display for NetworkCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Refused => "connection refused",
            Self::HostNotFound => "host not found",
            Self::Reset => "connection reset",
            Self::Other => "connection failed",
        };
        f.write_str(label)
    }
}

/// Walk the error source chain looking for an `io::Error` with a
/// recognizable kind.
fn io_cause(err: &reqwest::Error) -> Option<NetworkCause> {
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        if let Some(io_err) = inner.downcast_ref::<io::Error>() {
            if let Some(cause) = NetworkCause::from_io(io_err.kind()) {
                return Some(cause);
            }
        }
        source = inner.source();
    }
    None
}

/// DNS resolution failures do not carry a dedicated `io::ErrorKind`; the
/// resolver error in the chain identifies itself in its message.
fn dns_failure(err: &reqwest::Error) -> bool {
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        if inner.to_string().to_lowercase().contains("dns") {
            return true;
        }
        source = inner.source();
    }
    false
}
