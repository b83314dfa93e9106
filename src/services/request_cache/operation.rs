//! A single coalesced request: sole executor or registered waiter.

use serde::de::DeserializeOwned;

use crate::domain::error::BackendError;
use crate::domain::models::{AppUserId, AppUserIdError};
use crate::domain::ports::HttpTransport;

use super::dispatcher;
use super::key::{CacheKey, Operation};
use super::registry::{CacheStatus, CallbackRegistry, ResponseCallback};

/// One logical request against the backend.
///
/// On [`begin`](Self::begin) the request either becomes the sole executor
/// for its key (first registrant) or joins the in-flight epoch as a waiter;
/// it never performs the underlying call more than once per epoch.
pub struct CoalescedRequest<'a, T> {
    registry: &'a CallbackRegistry<ResponseCallback<T>>,
    transport: &'a dyn HttpTransport,
    operation: Operation,
    app_user_id: Result<AppUserId, AppUserIdError>,
}

impl<'a, T> CoalescedRequest<'a, T>
where
    T: DeserializeOwned + Clone,
{
    /// Build a request for `operation` scoped to `raw_app_user_id`.
    ///
    /// Scope validation happens here; a failure is held and delivered to
    /// the caller's completion handler when the request begins.
    pub fn new(
        registry: &'a CallbackRegistry<ResponseCallback<T>>,
        transport: &'a dyn HttpTransport,
        operation: Operation,
        raw_app_user_id: &str,
    ) -> Self {
        Self {
            registry,
            transport,
            operation,
            app_user_id: AppUserId::new(raw_app_user_id),
        }
    }

    /// Run the request, registering `completion` to receive its outcome.
    ///
    /// If the key could not be built, `completion` is invoked synchronously
    /// with the error; the registry and transport are never touched.
    /// Otherwise `completion` joins the key's waiter list, and the first
    /// registrant dispatches the underlying call for the epoch.
    ///
    /// The returned future completing is the "operation slot free" signal:
    /// it resolves immediately after joining for followers, and after the
    /// result fan-out for the epoch's leader, independent of when the other
    /// waiters observe their callbacks.
    pub async fn begin(self, completion: impl FnOnce(Result<T, BackendError>) + Send + 'static) {
        let completion: ResponseCallback<T> = Box::new(completion);

        let app_user_id = match self.app_user_id {
            Ok(app_user_id) => app_user_id,
            Err(err) => {
                completion(Err(BackendError::InvalidAppUserId(err)));
                return;
            }
        };

        let key = CacheKey::new(self.operation, &app_user_id);
        match self.registry.register(key.clone(), completion) {
            CacheStatus::AddedToExisting => {}
            CacheStatus::FirstRegistered => {
                let path = request_path(self.operation, &app_user_id);
                dispatcher::dispatch(self.transport, self.registry, &key, &path).await;
            }
        }
    }
}

fn request_path(operation: Operation, app_user_id: &AppUserId) -> String {
    match operation {
        Operation::GetOfferings => {
            format!("/subscribers/{}/offerings", app_user_id.path_segment())
        }
        Operation::GetCustomerInfo => format!("/subscribers/{}", app_user_id.path_segment()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(raw: &str) -> AppUserId {
        AppUserId::new(raw).unwrap()
    }

    #[test]
    fn offerings_path_is_user_scoped() {
        assert_eq!(
            request_path(Operation::GetOfferings, &user("abc")),
            "/subscribers/abc/offerings"
        );
    }

    #[test]
    fn customer_info_path_is_the_subscriber_resource() {
        assert_eq!(
            request_path(Operation::GetCustomerInfo, &user("abc")),
            "/subscribers/abc"
        );
    }

    #[test]
    fn paths_escape_the_scope_segment() {
        assert_eq!(
            request_path(Operation::GetOfferings, &user("user name")),
            "/subscribers/user%20name/offerings"
        );
    }
}
