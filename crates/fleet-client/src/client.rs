//! Backend HTTP client implementation

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use fleet_core::{classify, BackendCallResult, HealthProbe, ServiceHealth, TransportFault};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::error::Result;
use crate::observer::{CallObserver, CallOutcome, CallRecord, TracingObserver};

/// Default timeout for regular backend calls
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(5000);
/// Default timeout for liveness checks
pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_millis(2000);
/// Well-known liveness path every backend serves
const HEALTH_PATH: &str = "/health";

/// Timeouts applied by the [`BackendClient`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    /// Budget for regular calls
    pub request_timeout: Duration,
    /// Budget for health checks, independent of `request_timeout`
    pub health_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            health_timeout: DEFAULT_HEALTH_TIMEOUT,
        }
    }
}

/// Request payload for a backend call
#[derive(Debug, Clone, Default)]
pub enum Payload {
    #[default]
    None,
    /// Query string parameters
    Query(Vec<(String, String)>),
    /// JSON request body
    Json(Value),
}

/// A successful (2xx) backend response
#[derive(Debug, Clone, PartialEq)]
pub struct BackendResponse {
    pub status: u16,
    /// Decoded JSON body, `Null` when the body was empty
    pub body: Value,
}

/// Status and undecoded body of a response that arrived with a 2xx status
struct RawResponse {
    status: u16,
    text: String,
}

/// Timeout-bounded client for fleet backends
///
/// Cheap to clone; clones share the connection pool and observer.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    config: ClientConfig,
    observer: Arc<dyn CallObserver>,
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl BackendClient {
    /// Create a client that logs every call through `tracing`
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_observer(config, Arc::new(TracingObserver))
    }

    /// Create a client reporting calls to a custom observer
    pub fn with_observer(config: ClientConfig, observer: Arc<dyn CallObserver>) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            config,
            observer,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // =========================================================================
    // Calls
    // =========================================================================

    /// Call `method base_url+path` and return the decoded JSON response.
    ///
    /// Any non-2xx status, connection failure or timeout comes back as a
    /// classified [`CallFailure`]. There are no retries.
    #[instrument(skip(self, payload))]
    pub async fn call(
        &self,
        method: Method,
        base_url: &str,
        path: &str,
        payload: Payload,
    ) -> BackendCallResult<BackendResponse> {
        self.dispatch(
            method,
            base_url,
            path,
            payload,
            self.config.request_timeout,
            |raw| {
                Ok(BackendResponse {
                    status: raw.status,
                    body: decode_json(&raw.text)?,
                })
            },
        )
        .await
    }

    /// Like [`call`](Self::call), deserializing the body into `T`.
    ///
    /// A body that does not match `T` is reported as an `Unknown` failure.
    #[instrument(skip(self, payload))]
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        method: Method,
        base_url: &str,
        path: &str,
        payload: Payload,
    ) -> BackendCallResult<T> {
        self.dispatch(
            method,
            base_url,
            path,
            payload,
            self.config.request_timeout,
            |raw| {
                serde_json::from_str(&raw.text).map_err(|e| TransportFault::Decode(e.to_string()))
            },
        )
        .await
    }

    /// Check a backend's liveness endpoint.
    ///
    /// Uses the health timeout. Never fails: every failure is reported as
    /// `available = false` with the failure text as detail.
    #[instrument(skip(self))]
    pub async fn health_check(&self, base_url: &str) -> ServiceHealth {
        let result = self
            .dispatch(
                Method::GET,
                base_url,
                HEALTH_PATH,
                Payload::None,
                self.config.health_timeout,
                |raw| {
                    // Liveness payloads are often plain text ("OK")
                    Ok(decode_json(&raw.text).unwrap_or(Value::String(raw.text)))
                },
            )
            .await;

        match result {
            Ok(status) => ServiceHealth::up(status),
            Err(failure) => ServiceHealth::down(failure.to_string()),
        }
    }

    /// Send one request, classify its outcome and report it to the observer.
    async fn dispatch<T, F>(
        &self,
        method: Method,
        base_url: &str,
        path: &str,
        payload: Payload,
        timeout: Duration,
        decode: F,
    ) -> BackendCallResult<T>
    where
        F: FnOnce(RawResponse) -> std::result::Result<T, TransportFault>,
    {
        let url = join_url(base_url, path);
        let started = Instant::now();

        let outcome = match &url {
            Ok(url) => self.send(method.clone(), url.clone(), payload, timeout).await,
            Err(e) => Err(TransportFault::Other(format!("invalid backend URL: {}", e))),
        };
        let outcome = outcome.and_then(|raw| {
            let status = raw.status;
            decode(raw).map(|value| (status, value))
        });
        let elapsed = started.elapsed();

        let result = outcome.map_err(|fault| classify(fault, elapsed, timeout));

        let url = url.map_or_else(|_| format!("{}{}", base_url, path), String::from);
        self.observer.record(&CallRecord {
            method,
            url,
            outcome: match &result {
                Ok((status, _)) => CallOutcome::Success { status: *status },
                Err(failure) => CallOutcome::Failure(failure.kind.clone()),
            },
            elapsed,
        });

        result.map(|(_, value)| value)
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        payload: Payload,
        timeout: Duration,
    ) -> std::result::Result<RawResponse, TransportFault> {
        debug!(%method, %url, "Calling backend");

        let request = self.client.request(method, url).timeout(timeout);
        let request = match payload {
            Payload::None => request,
            Payload::Query(params) => request.query(&params),
            Payload::Json(body) => request.json(&body),
        };

        let response = request.send().await.map_err(transport_fault)?;
        let status = response.status();
        let text = response.text().await.map_err(transport_fault)?;

        if status.is_success() {
            Ok(RawResponse {
                status: status.as_u16(),
                text,
            })
        } else {
            Err(TransportFault::Status {
                status: status.as_u16(),
                body: Some(text),
            })
        }
    }
}

#[async_trait]
impl HealthProbe for BackendClient {
    async fn probe(&self, base_url: &str) -> ServiceHealth {
        self.health_check(base_url).await
    }
}

/// Concatenate a backend base URL and an endpoint path.
///
/// The base may carry its own path prefix, so this is plain concatenation
/// rather than RFC 3986 reference resolution.
fn join_url(base_url: &str, path: &str) -> std::result::Result<Url, url::ParseError> {
    Url::parse(&format!("{}{}", base_url.trim_end_matches('/'), path))
}

fn decode_json(text: &str) -> std::result::Result<Value, TransportFault> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| TransportFault::Decode(e.to_string()))
}

/// Describe a `reqwest` error without tying the classifier to `reqwest`.
fn transport_fault(err: reqwest::Error) -> TransportFault {
    if err.is_timeout() {
        TransportFault::TimedOut(err.to_string())
    } else if err.is_connect() {
        TransportFault::Connect(err.to_string())
    } else if err.is_decode() || err.is_body() {
        TransportFault::Decode(err.to_string())
    } else {
        TransportFault::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.request_timeout, Duration::from_millis(5000));
        assert_eq!(config.health_timeout, Duration::from_millis(2000));
    }

    #[test]
    fn test_client_creation() {
        let client = BackendClient::new(ClientConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://localhost:3002", "/routes").unwrap().as_str(),
            "http://localhost:3002/routes"
        );
        assert_eq!(
            join_url("http://localhost:3002/", "/routes/7").unwrap().as_str(),
            "http://localhost:3002/routes/7"
        );
        assert_eq!(
            join_url("http://gw.local/registry", "/units").unwrap().as_str(),
            "http://gw.local/registry/units"
        );
    }

    #[test]
    fn test_invalid_url() {
        assert!(join_url("not a url", "/routes").is_err());
    }

    #[test]
    fn test_decode_empty_body() {
        assert_eq!(decode_json("").unwrap(), Value::Null);
        assert!(matches!(
            decode_json("<html>"),
            Err(TransportFault::Decode(_))
        ));
    }
}
