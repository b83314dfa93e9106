//! The asynchronous HTTP transport port.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// A raw backend response: status code plus leniently parsed JSON body.
///
/// Adapters parse the body as JSON and substitute [`Value::Null`] when it is
/// not valid JSON; shape enforcement belongs to the dispatcher, not the
/// transport.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,

    /// Response body parsed as JSON, or `Value::Null`
    pub body: Value,
}

/// The underlying call itself failed: connectivity, TLS, timeout.
///
/// Carries a message plus the boxed underlying cause so the error can be
/// reported to every waiter of a coalesced request via a shared `Arc`.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    timed_out: bool,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    /// An error with no underlying cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timed_out: false,
            source: None,
        }
    }

    /// An error wrapping an underlying cause.
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            timed_out: false,
            source: Some(source.into()),
        }
    }

    /// Mark this error as a timeout.
    pub fn timeout(mut self) -> Self {
        self.timed_out = true;
        self
    }

    /// Whether the request timed out rather than failing outright.
    pub fn is_timeout(&self) -> bool {
        self.timed_out
    }
}

/// Port trait for the asynchronous HTTP call primitive.
///
/// Implementations own everything transport-level: URL assembly, headers,
/// timeouts, connection pooling, and any retry policy. The coalescing core
/// calls [`perform_request`](Self::perform_request) exactly once per
/// coalescing epoch and classifies the outcome itself.
///
/// Implementations must be `Send + Sync`; requests may be performed
/// concurrently from multiple tasks.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform a GET against `path` (relative to the adapter's base URL).
    async fn perform_request(&self, path: &str) -> Result<HttpResponse, TransportError>;
}
