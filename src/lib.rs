//! Tollgate - purchases backend client core
//!
//! Tollgate is the backend layer of an in-app purchase SDK: it fetches
//! offerings and subscriber (entitlement) data from a remote purchases
//! backend, collapsing concurrent requests for the same resource into a
//! single in-flight network call.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): payload models, configuration, error
//!   taxonomy, and the transport port
//! - **Service Layer** (`services`): the request-coalescing callback cache
//!   and the [`Backend`] facade built on top of it
//! - **Infrastructure Layer** (`infrastructure`): the reqwest transport
//!   adapter, configuration loading, and logging setup
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tollgate::{Backend, ClientConfig, ReqwestTransport};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut config = ClientConfig::default();
//! config.api_key = "pk_live_example".to_string();
//!
//! let transport = Arc::new(ReqwestTransport::new(&config)?);
//! let backend = Backend::new(transport);
//!
//! let offerings = backend.get_offerings("app-user-1").await?;
//! println!("current offering: {:?}", offerings.current_offering_id);
//! # Ok(())
//! # }
//! ```

pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::error::{BackendError, UNKNOWN_BACKEND_ERROR_CODE};
pub use domain::models::{
    AppUserId, AppUserIdError, ClientConfig, CustomerInfoResponse, Entitlement, HttpConfig,
    LoggingConfig, Offering, OfferingsResponse, Package, RetryConfig, Subscriber,
};
pub use domain::ports::{HttpResponse, HttpTransport, TransportError};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::http::{ReqwestTransport, RetryPolicy};
pub use services::request_cache::{
    CacheKey, CacheStatus, CallbackRegistry, CoalescedRequest, Operation, ResponseCallback,
};
pub use services::Backend;
