//! Failure taxonomy for backend calls
//!
//! Every call the gateway makes to a backend ends either in data or in a
//! [`CallFailure`]. The failure kind is one of a closed set of four, so the
//! HTTP layer can map it to a status code without looking at transport
//! errors.

use std::fmt;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

/// Result type for backend calls
pub type BackendCallResult<T> = Result<T, CallFailure>;

/// Closed set of backend failure kinds
#[derive(Debug, Clone, PartialEq)]
pub enum FailureKind {
    /// The call did not complete within its timeout
    Timeout,
    /// The backend could not be reached (refused, unreachable, DNS)
    ConnectionRefused,
    /// The backend answered with a non-2xx status
    Upstream {
        status: u16,
        /// Response body, parsed as JSON when possible
        body: Option<Value>,
    },
    /// Anything else
    Unknown,
}

impl FailureKind {
    /// Short snake_case label used in logs and error bodies
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Timeout => "timeout",
            FailureKind::ConnectionRefused => "connection_refused",
            FailureKind::Upstream { .. } => "upstream_error",
            FailureKind::Unknown => "unknown",
        }
    }

    /// Returns the HTTP status code the gateway answers with for this kind
    pub fn status_code(&self) -> u16 {
        match self {
            FailureKind::Timeout => 504,
            FailureKind::ConnectionRefused => 503,
            FailureKind::Upstream { status, .. } => *status,
            FailureKind::Unknown => 500,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Upstream { status, .. } => write!(f, "upstream_error({})", status),
            other => f.write_str(other.as_str()),
        }
    }
}

/// A classified backend call failure
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {message}")]
pub struct CallFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl CallFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Timeout, message)
    }

    pub fn connection_refused(message: impl Into<String>) -> Self {
        Self::new(FailureKind::ConnectionRefused, message)
    }

    pub fn upstream(status: u16, body: Option<Value>, message: impl Into<String>) -> Self {
        Self::new(FailureKind::Upstream { status, body }, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Unknown, message)
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, FailureKind::Timeout)
    }
}

/// What went wrong at the transport level, described independently of any
/// particular HTTP client library.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportFault {
    /// A response arrived with a non-2xx status
    Status { status: u16, body: Option<String> },
    /// The transport reported a timeout
    TimedOut(String),
    /// The connection could not be established (refused, unreachable, DNS)
    Connect(String),
    /// A 2xx response whose body could not be decoded
    Decode(String),
    /// Any other transport error
    Other(String),
}

/// Map a transport fault onto the failure taxonomy.
///
/// A received status always wins: the backend answered, so the outcome is an
/// upstream error no matter how long it took. Otherwise a call that used up
/// its whole budget is a timeout, even if the transport surfaced it as a
/// connection error.
///
/// ```
/// # use std::time::Duration;
/// # use fleet_core::{classify, FailureKind, TransportFault};
/// let failure = classify(
///     TransportFault::Connect("connection refused".into()),
///     Duration::from_millis(3),
///     Duration::from_millis(5000),
/// );
/// assert_eq!(failure.kind, FailureKind::ConnectionRefused);
/// ```
pub fn classify(fault: TransportFault, elapsed: Duration, timeout: Duration) -> CallFailure {
    match fault {
        TransportFault::Status { status, body } => {
            let body = body.filter(|b| !b.trim().is_empty()).map(|raw| {
                serde_json::from_str::<Value>(&raw).unwrap_or(Value::String(raw))
            });
            let message = body
                .as_ref()
                .and_then(upstream_message)
                .unwrap_or_else(|| format!("HTTP {}", status));
            CallFailure::upstream(status, body, message)
        }
        TransportFault::TimedOut(msg) => CallFailure::timeout(msg),
        _ if elapsed >= timeout => CallFailure::timeout(format!(
            "no response within {} ms",
            timeout.as_millis()
        )),
        TransportFault::Connect(msg) => CallFailure::connection_refused(msg),
        TransportFault::Decode(msg) => {
            CallFailure::unknown(format!("invalid response body: {}", msg))
        }
        TransportFault::Other(msg) => CallFailure::unknown(msg),
    }
}

/// Pull a human readable message out of an upstream error body.
fn upstream_message(body: &Value) -> Option<String> {
    match body {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => ["message", "error"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::to_string),
        _ => None,
    }
}
