//! Error taxonomy for backend operations.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::domain::models::AppUserIdError;
use crate::domain::ports::TransportError;

/// Backend error code reported when an error body carries no `code` field.
pub const UNKNOWN_BACKEND_ERROR_CODE: i64 = 7000;

/// Errors delivered to callers of backend operations.
///
/// Every variant is terminal for its coalescing epoch: the core performs no
/// retries, and each registered waiter receives exactly one of these (or a
/// success payload). `Clone` so a single outcome can fan out to every
/// waiter; the transport cause is shared behind an `Arc` for that reason.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    /// The request key could not be built from the caller's scope input.
    /// Reported synchronously; no network call is attempted.
    #[error("invalid app user id: {0}")]
    InvalidAppUserId(#[from] AppUserIdError),

    /// The underlying call itself failed (connectivity, TLS, timeout)
    #[error("network error: {0}")]
    Network(Arc<TransportError>),

    /// The backend answered with an error-range status
    #[error("backend error {code} (status {status})")]
    Backend {
        /// HTTP status the backend responded with
        status: u16,
        /// Backend-supplied error code, or [`UNKNOWN_BACKEND_ERROR_CODE`]
        code: i64,
        /// Backend-supplied message, if any
        message: Option<String>,
    },

    /// The backend answered success but the body failed shape validation
    #[error("unexpected backend response (status {status})")]
    UnexpectedResponse {
        /// HTTP status the backend responded with
        status: u16,
    },
}

impl BackendError {
    /// Build a [`BackendError::Backend`] from an error-range response body.
    ///
    /// Missing fields fall back per the wire contract: no `code` becomes
    /// [`UNKNOWN_BACKEND_ERROR_CODE`], no `message` becomes `None`.
    pub(crate) fn from_error_body(status: u16, body: &Value) -> Self {
        let code = body
            .get("code")
            .and_then(Value::as_i64)
            .unwrap_or(UNKNOWN_BACKEND_ERROR_CODE);
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_owned);
        Self::Backend {
            status,
            code,
            message,
        }
    }

    /// The backend-supplied error code, when this is a backend error.
    pub fn backend_code(&self) -> Option<i64> {
        match self {
            Self::Backend { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// The underlying transport cause, when this is a network error.
    pub fn transport_cause(&self) -> Option<&TransportError> {
        match self {
            Self::Network(cause) => Some(cause),
            _ => None,
        }
    }
}

impl From<TransportError> for BackendError {
    fn from(err: TransportError) -> Self {
        Self::Network(Arc::new(err))
    }
}
