//! Domain models: scope identifiers, payloads, and configuration.

pub mod app_user_id;
pub mod config;
pub mod customer_info;
pub mod offerings;

pub use app_user_id::{AppUserId, AppUserIdError};
pub use config::{ClientConfig, HttpConfig, LoggingConfig, RetryConfig};
pub use customer_info::{CustomerInfoResponse, Entitlement, Subscriber};
pub use offerings::{Offering, OfferingsResponse, Package};
