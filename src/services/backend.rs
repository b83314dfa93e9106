//! Facade over the purchases backend.

use std::sync::Arc;

use tokio::sync::oneshot;

use crate::domain::error::BackendError;
use crate::domain::models::{CustomerInfoResponse, OfferingsResponse};
use crate::domain::ports::{HttpTransport, TransportError};

use super::request_cache::{CallbackRegistry, CoalescedRequest, Operation, ResponseCallback};

/// Entry point for backend operations.
///
/// Holds the shared transport and one callback registry per payload type,
/// so concurrent requests for the same user coalesce onto a single network
/// call. Construct one `Backend` per SDK instance and share it; the
/// registries have no value cache, only in-flight state, so an idle
/// `Backend` holds no per-user memory.
pub struct Backend {
    transport: Arc<dyn HttpTransport>,
    offerings_callbacks: CallbackRegistry<ResponseCallback<OfferingsResponse>>,
    customer_info_callbacks: CallbackRegistry<ResponseCallback<CustomerInfoResponse>>,
}

impl Backend {
    /// A backend facade using `transport` for all network work.
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            offerings_callbacks: CallbackRegistry::new(),
            customer_info_callbacks: CallbackRegistry::new(),
        }
    }

    /// Fetch the offerings for `app_user_id`, delivering the outcome to
    /// `completion` exactly once.
    ///
    /// The future resolving signals that the operation slot is free (the
    /// request either joined an in-flight epoch or led one to completion);
    /// for followers, `completion` fires later, when the leader's epoch
    /// fans out.
    pub async fn fetch_offerings(
        &self,
        app_user_id: &str,
        completion: impl FnOnce(Result<OfferingsResponse, BackendError>) + Send + 'static,
    ) {
        CoalescedRequest::new(
            &self.offerings_callbacks,
            self.transport.as_ref(),
            Operation::GetOfferings,
            app_user_id,
        )
        .begin(completion)
        .await;
    }

    /// Fetch the offerings for `app_user_id`.
    pub async fn get_offerings(
        &self,
        app_user_id: &str,
    ) -> Result<OfferingsResponse, BackendError> {
        let (tx, rx) = oneshot::channel();
        self.fetch_offerings(app_user_id, move |result| {
            // The receiver may have been dropped by an abandoning caller;
            // the result is simply discarded in that case.
            let _ = tx.send(result);
        })
        .await;
        recv_result(rx).await
    }

    /// Fetch the subscriber record for `app_user_id`, delivering the
    /// outcome to `completion` exactly once.
    pub async fn fetch_customer_info(
        &self,
        app_user_id: &str,
        completion: impl FnOnce(Result<CustomerInfoResponse, BackendError>) + Send + 'static,
    ) {
        CoalescedRequest::new(
            &self.customer_info_callbacks,
            self.transport.as_ref(),
            Operation::GetCustomerInfo,
            app_user_id,
        )
        .begin(completion)
        .await;
    }

    /// Fetch the subscriber record for `app_user_id`.
    pub async fn get_customer_info(
        &self,
        app_user_id: &str,
    ) -> Result<CustomerInfoResponse, BackendError> {
        let (tx, rx) = oneshot::channel();
        self.fetch_customer_info(app_user_id, move |result| {
            let _ = tx.send(result);
        })
        .await;
        recv_result(rx).await
    }
}

async fn recv_result<T>(rx: oneshot::Receiver<Result<T, BackendError>>) -> Result<T, BackendError> {
    match rx.await {
        Ok(result) => result,
        // Unreachable as long as every registered callback is invoked;
        // surfaced as a network-class error rather than a panic.
        Err(_) => Err(TransportError::new("coalesced result dropped before delivery").into()),
    }
}
