//! Reqwest-backed implementation of the transport port.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client as ReqwestClient};
use serde_json::Value;
use tracing::{debug, info};

use crate::domain::models::ClientConfig;
use crate::domain::ports::{HttpResponse, HttpTransport, TransportError};

use super::retry::RetryPolicy;

/// HTTP transport for the purchases backend
///
/// Provides the asynchronous call primitive the coalescing core depends on:
/// - Connection pooling and reuse (via `reqwest::Client`)
/// - Default headers (authorization, platform tag)
/// - Request timeout from configuration
/// - Exponential-backoff retries for server errors and timeouts
pub struct ReqwestTransport {
    http_client: ReqwestClient,
    base_url: String,
    retry_policy: RetryPolicy,
}

impl ReqwestTransport {
    /// Build a transport from client configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        // Scrub the API key from logs
        let api_key_scrubbed = if config.api_key.len() > 8 {
            format!("{}...[REDACTED]", &config.api_key[..8])
        } else {
            "[REDACTED]".to_string()
        };

        info!(
            "initializing backend transport: base_url={}, timeout={}s, api_key={}",
            config.base_url, config.http.timeout_secs, api_key_scrubbed
        );

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .context("api key is not a valid header value")?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert("x-platform", header::HeaderValue::from_static("rust"));

        let http_client = ReqwestClient::builder()
            .pool_max_idle_per_host(10)
            .timeout(Duration::from_secs(config.http.timeout_secs))
            .tcp_nodelay(true)
            .default_headers(headers)
            .build()
            .context("failed to build http client")?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            retry_policy: RetryPolicy::new(
                config.retry.max_retries,
                config.retry.initial_backoff_ms,
                config.retry.max_backoff_ms,
            ),
        })
    }

    async fn execute_once(&self, path: &str) -> Result<HttpResponse, TransportError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {url}");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(into_transport_error)?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(into_transport_error)?;

        // The body is parsed leniently; shape enforcement happens in the
        // dispatcher, which also owns error-body interpretation.
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn perform_request(&self, path: &str) -> Result<HttpResponse, TransportError> {
        self.retry_policy
            .execute(|| self.execute_once(path))
            .await
    }
}

fn into_transport_error(err: reqwest::Error) -> TransportError {
    let timed_out = err.is_timeout();
    let transport = TransportError::with_source("http request failed", err);
    if timed_out {
        transport.timeout()
    } else {
        transport
    }
}
