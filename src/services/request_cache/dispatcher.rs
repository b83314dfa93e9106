//! Executes the underlying call for a key and fans the result out.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error};

use crate::domain::error::BackendError;
use crate::domain::ports::{HttpResponse, HttpTransport, TransportError};

use super::key::CacheKey;
use super::registry::{CallbackRegistry, ResponseCallback};

/// Perform the underlying call for `key` exactly once, then drain the
/// key's waiters and invoke each with a clone of the single result.
///
/// Callbacks run after the registry lock is released, in registration
/// order; a callback that itself starts a new coalesced request cannot
/// deadlock against the registry.
pub(crate) async fn dispatch<T>(
    transport: &dyn HttpTransport,
    registry: &CallbackRegistry<ResponseCallback<T>>,
    key: &CacheKey,
    path: &str,
) where
    T: DeserializeOwned + Clone,
{
    debug!(%key, path, "dispatching coalesced request");
    let result = classify::<T>(transport.perform_request(path).await);

    let callbacks = registry.drain_and_remove(key);
    debug!(%key, waiters = callbacks.len(), "delivering coalesced result");
    for callback in callbacks {
        callback(result.clone());
    }
}

/// Classify a raw transport outcome into the error taxonomy.
fn classify<T>(outcome: Result<HttpResponse, TransportError>) -> Result<T, BackendError>
where
    T: DeserializeOwned,
{
    let response = match outcome {
        Ok(response) => response,
        Err(err) => return Err(err.into()),
    };

    // Redirects are never expected from this API surface, so anything
    // outside the success range is a backend error.
    if response.status >= 300 {
        let err = BackendError::from_error_body(response.status, &response.body);
        error!(status = response.status, "backend returned an error response: {err}");
        return Err(err);
    }

    match T::deserialize(&response.body) {
        Ok(parsed) => Ok(parsed),
        Err(parse_err) => {
            error!(
                status = response.status,
                body = ?response.body,
                "backend response failed shape validation: {parse_err}"
            );
            Err(BackendError::UnexpectedResponse {
                status: response.status,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::UNKNOWN_BACKEND_ERROR_CODE;
    use crate::domain::models::OfferingsResponse;
    use serde_json::json;

    fn response(status: u16, body: serde_json::Value) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse { status, body })
    }

    #[test]
    fn success_status_with_well_shaped_body_parses() {
        let outcome = response(200, json!({ "offerings": [] }));
        let parsed: OfferingsResponse = classify(outcome).unwrap();
        assert!(parsed.offerings.is_empty());
    }

    #[test]
    fn error_status_carries_backend_code_and_message() {
        let outcome = response(500, json!({ "code": 7101, "message": "boom" }));
        let err = classify::<OfferingsResponse>(outcome).unwrap_err();
        match err {
            BackendError::Backend {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 500);
                assert_eq!(code, 7101);
                assert_eq!(message.as_deref(), Some("boom"));
            }
            other => panic!("unexpected classification: {other:?}"),
        }
    }

    #[test]
    fn error_status_without_code_uses_the_unknown_code() {
        let outcome = response(500, json!({}));
        let err = classify::<OfferingsResponse>(outcome).unwrap_err();
        assert_eq!(err.backend_code(), Some(UNKNOWN_BACKEND_ERROR_CODE));
    }

    #[test]
    fn redirection_status_is_a_backend_error() {
        let outcome = response(302, serde_json::Value::Null);
        let err = classify::<OfferingsResponse>(outcome).unwrap_err();
        assert!(matches!(err, BackendError::Backend { status: 302, .. }));
    }

    #[test]
    fn malformed_success_body_is_unexpected_response() {
        let outcome = response(200, json!({ "unrelated": true }));
        let err = classify::<OfferingsResponse>(outcome).unwrap_err();
        assert!(matches!(err, BackendError::UnexpectedResponse { status: 200 }));
    }

    #[test]
    fn transport_failure_is_a_network_error() {
        let err = classify::<OfferingsResponse>(Err(TransportError::new("connection refused")))
            .unwrap_err();
        assert!(err.transport_cause().is_some());
    }
}
