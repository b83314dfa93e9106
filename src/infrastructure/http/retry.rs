//! Retry policy for the transport adapter.
//!
//! Retrying is a transport concern: the coalescing core performs exactly
//! one `perform_request` per epoch and never retries, so any retry policy
//! lives here, inside that single call.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::warn;

use crate::domain::ports::{HttpResponse, TransportError};

/// Retry policy with exponential backoff.
///
/// Retries server errors (status >= 500) and transport timeouts; all other
/// outcomes are returned immediately. Backoff doubles per attempt, capped
/// at the configured maximum.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_retries: u32,
    initial_backoff_ms: u64,
    max_backoff_ms: u64,
}

impl RetryPolicy {
    /// A policy allowing `max_retries` retries after the initial attempt.
    pub fn new(max_retries: u32, initial_backoff_ms: u64, max_backoff_ms: u64) -> Self {
        Self {
            max_retries,
            initial_backoff_ms,
            max_backoff_ms,
        }
    }

    pub(crate) async fn execute<F, Fut>(&self, mut operation: F) -> Result<HttpResponse, TransportError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<HttpResponse, TransportError>>,
    {
        let mut attempt = 0;
        let mut backoff_ms = self.initial_backoff_ms;

        loop {
            let retry_cause = match operation().await {
                Ok(response) if response.status >= 500 && attempt < self.max_retries => {
                    format!("status {}", response.status)
                }
                Ok(response) => return Ok(response),
                Err(err) if err.is_timeout() && attempt < self.max_retries => err.to_string(),
                Err(err) => return Err(err),
            };

            attempt += 1;
            warn!(
                attempt,
                max_retries = self.max_retries,
                "retrying request after {retry_cause}, backing off {backoff_ms}ms"
            );
            sleep(Duration::from_millis(backoff_ms)).await;
            backoff_ms = backoff_ms.saturating_mul(2).min(self.max_backoff_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn ok(status: u16) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse {
            status,
            body: Value::Null,
        })
    }

    #[tokio::test]
    async fn timeouts_are_retried_until_success() {
        let policy = RetryPolicy::new(2, 1, 4);
        let attempts = AtomicU32::new(0);

        let result = policy
            .execute(|| {
                let attempt = attempts.fetch_add(1, Ordering::SeqCst);
                async move {
                    if attempt < 2 {
                        Err(TransportError::new("timed out").timeout())
                    } else {
                        ok(200)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap().status, 200);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn server_errors_are_retried_then_returned() {
        let policy = RetryPolicy::new(1, 1, 4);
        let attempts = AtomicU32::new(0);

        let result = policy
            .execute(|| {
                attempts.fetch_add(1, Ordering::SeqCst);
                async { ok(500) }
            })
            .await;

        // The final 500 is still returned as a response, not an error;
        // classification is the dispatcher's job.
        assert_eq!(result.unwrap().status, 500);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn non_timeout_failures_are_not_retried() {
        let policy = RetryPolicy::new(3, 1, 4);
        let attempts = AtomicU32::new(0);

        let result = policy
            .execute(|| {
                attempts.fetch_add(1, Ordering::SeqCst);
                async { Err(TransportError::new("connection refused")) }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let policy = RetryPolicy::new(3, 1, 4);
        let attempts = AtomicU32::new(0);

        let result = policy
            .execute(|| {
                attempts.fetch_add(1, Ordering::SeqCst);
                async { ok(404) }
            })
            .await;

        assert_eq!(result.unwrap().status, 404);
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
